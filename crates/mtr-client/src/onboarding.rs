//! Three-step mentee onboarding wizard.
//!
//! Answers are collected per step, checked before the wizard advances, and
//! flattened into one [`MenteeRegistration`] for submission.

use mtr_domain::MenteeRegistration;
use thiserror::Error;

use crate::{ApiClient, ClientError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    #[default]
    Personal,
    Background,
    Goals,
}

impl Step {
    pub const ALL: [Self; 3] = [Self::Personal, Self::Background, Self::Goals];

    /// 1-based position, for "Step 2 of 3" style labels
    pub const fn number(self) -> usize {
        match self {
            Self::Personal => 1,
            Self::Background => 2,
            Self::Goals => 3,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Personal => "Personal information",
            Self::Background => "Background",
            Self::Goals => "Learning goals",
        }
    }

    pub const fn fields(self) -> &'static [Field] {
        match self {
            Self::Personal => &[
                Field::FirstName,
                Field::LastName,
                Field::Email,
                Field::Password,
                Field::Phone,
            ],
            Self::Background => &[
                Field::EducationLevel,
                Field::Occupation,
                Field::ExperienceLevel,
            ],
            Self::Goals => &[Field::LearningGoals, Field::Interests, Field::Availability],
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::Personal => Some(Self::Background),
            Self::Background => Some(Self::Goals),
            Self::Goals => None,
        }
    }

    const fn previous(self) -> Option<Self> {
        match self {
            Self::Personal => None,
            Self::Background => Some(Self::Personal),
            Self::Goals => Some(Self::Background),
        }
    }
}

/// A single wizard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    Phone,
    EducationLevel,
    Occupation,
    ExperienceLevel,
    LearningGoals,
    Interests,
    Availability,
}

impl Field {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Phone => "Phone number",
            Self::EducationLevel => "Education level",
            Self::Occupation => "Occupation",
            Self::ExperienceLevel => "Experience level",
            Self::LearningGoals => "Learning goals",
            Self::Interests => "Interests",
            Self::Availability => "Availability",
        }
    }
}

/// Required fields left empty on one step
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .step.title(), required_messages(.missing).join(", "))]
pub struct StepErrors {
    pub step: Step,
    pub missing: Vec<Field>,
}

fn required_messages(missing: &[Field]) -> Vec<String> {
    missing
        .iter()
        .map(|field| format!("{} is required", field.label()))
        .collect()
}

impl StepErrors {
    pub fn messages(&self) -> Vec<String> {
        required_messages(&self.missing)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("onboarding is incomplete: {0}")]
    Incomplete(StepErrors),
    #[error(transparent)]
    Api(#[from] ClientError),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Incomplete(errors) => format!(
                "Please complete the {} step: {}",
                errors.step.title().to_lowercase(),
                errors.messages().join(", ")
            ),
            Self::Api(error) => error.user_message(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingWizard {
    current: Step,
    answers: MenteeRegistration,
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> Step {
        self.current
    }

    pub fn is_last_step(&self) -> bool {
        self.current.next().is_none()
    }

    pub fn value(&self, field: Field) -> &str {
        let a = &self.answers;
        match field {
            Field::FirstName => &a.first_name,
            Field::LastName => &a.last_name,
            Field::Email => &a.email,
            Field::Password => &a.password,
            Field::Phone => &a.phone,
            Field::EducationLevel => &a.education_level,
            Field::Occupation => &a.occupation,
            Field::ExperienceLevel => &a.experience_level,
            Field::LearningGoals => &a.learning_goals,
            Field::Interests => &a.interests,
            Field::Availability => &a.availability,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let a = &mut self.answers;
        let slot = match field {
            Field::FirstName => &mut a.first_name,
            Field::LastName => &mut a.last_name,
            Field::Email => &mut a.email,
            Field::Password => &mut a.password,
            Field::Phone => &mut a.phone,
            Field::EducationLevel => &mut a.education_level,
            Field::Occupation => &mut a.occupation,
            Field::ExperienceLevel => &mut a.experience_level,
            Field::LearningGoals => &mut a.learning_goals,
            Field::Interests => &mut a.interests,
            Field::Availability => &mut a.availability,
        };
        *slot = value.into();
    }

    /// Fields of `step` that are empty once whitespace is trimmed
    pub fn validate_step(&self, step: Step) -> Result<(), StepErrors> {
        let missing: Vec<Field> = step
            .fields()
            .iter()
            .copied()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(StepErrors { step, missing })
        }
    }

    /// Advance when the current step is complete; stays put on the last step
    pub fn next_step(&mut self) -> Result<Step, StepErrors> {
        self.validate_step(self.current)?;
        if let Some(next) = self.current.next() {
            self.current = next;
        }
        Ok(self.current)
    }

    /// Go back one step without validating
    pub fn previous_step(&mut self) -> Step {
        if let Some(previous) = self.current.previous() {
            self.current = previous;
        }
        self.current
    }

    /// All answers as one registration payload
    pub fn payload(&self) -> MenteeRegistration {
        self.answers.clone()
    }

    /// Validate every step, then register the mentee
    ///
    /// On missing answers the wizard jumps to the first incomplete step and
    /// nothing is sent.
    pub async fn submit(&mut self, client: &ApiClient) -> Result<String, SubmitError> {
        for step in Step::ALL {
            if let Err(errors) = self.validate_step(step) {
                self.current = step;
                return Err(SubmitError::Incomplete(errors));
            }
        }

        let message = client.register_mentee(&self.payload()).await?;
        tracing::info!("mentee onboarding submitted");
        Ok(message)
    }
}
