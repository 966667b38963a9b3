// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut Transaction` (atomic operations).

pub mod enrollment;
pub mod mentee;
pub mod mentor;
pub mod program;
pub mod user;
