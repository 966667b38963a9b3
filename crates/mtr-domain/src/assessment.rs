//! Assessments, submissions and grading.
//!
//! Aggregate statistics are derived from the submissions each time they are
//! requested rather than maintained incrementally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Kind of assessment attached to a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentType {
    Quiz,
    Assignment,
    Project,
    Exam,
}

/// A single question and the points it is worth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub prompt: String,
    /// Contribution to [`Assessment::max_points`]
    pub points: u32,
}

/// Grading state of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Graded,
}

/// One learner's answer to an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub learner_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
    /// Points awarded, set once graded
    pub score: Option<u32>,
    /// Grader's comments, replaced on each grade
    pub feedback: Option<String>,
}

impl Submission {
    /// New ungraded submission stamped with the current time
    pub fn pending(learner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            learner_id,
            submitted_at: Utc::now(),
            status: SubmissionStatus::Pending,
            score: None,
            feedback: None,
        }
    }
}

/// Why a grade was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    #[error("submission {0} not found")]
    SubmissionNotFound(Uuid),
    #[error("score {score} exceeds the maximum of {max} points")]
    ScoreTooHigh { score: u32, max: u32 },
}

/// Aggregate view over an assessment's submissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentStats {
    /// Mean graded score as a percentage of the maximum points
    pub average_score: Option<f64>,
    /// Share of enrolled learners who submitted, as a percentage
    pub completion_rate: f64,
    /// Submissions with a recorded score
    pub graded_count: usize,
    /// Submissions awaiting a grade
    pub pending_count: usize,
}

/// An assessment with its questions and every submission received so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: Uuid,
    pub title: String,
    pub assessment_type: AssessmentType,
    /// Questions in display order
    pub questions: Vec<Question>,
    /// At most one per learner is expected but not enforced
    pub submissions: Vec<Submission>,
    /// Learners expected to submit
    pub enrolled_count: u32,
}

impl Assessment {
    /// Sum of all question points
    pub fn max_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// Record a grade for a submission
    pub fn grade(
        &mut self,
        submission_id: Uuid,
        score: u32,
        feedback: Option<String>,
    ) -> Result<(), GradingError> {
        let max = self.max_points();
        if score > max {
            return Err(GradingError::ScoreTooHigh { score, max });
        }

        let submission = self
            .submissions
            .iter_mut()
            .find(|s| s.id == submission_id)
            .ok_or(GradingError::SubmissionNotFound(submission_id))?;

        submission.score = Some(score);
        submission.feedback = feedback;
        submission.status = SubmissionStatus::Graded;
        Ok(())
    }

    /// Average score, completion rate and grading backlog
    pub fn stats(&self) -> AssessmentStats {
        let max = f64::from(self.max_points());
        let graded: Vec<u32> = self
            .submissions
            .iter()
            .filter(|s| s.status == SubmissionStatus::Graded)
            .filter_map(|s| s.score)
            .collect();

        let average_score = (!graded.is_empty() && max > 0.0).then(|| {
            let total: f64 = graded.iter().map(|&s| f64::from(s) / max * 100.0).sum();
            total / graded.len() as f64
        });

        let completion_rate = if self.enrolled_count == 0 {
            0.0
        } else {
            (self.submissions.len() as f64 / f64::from(self.enrolled_count) * 100.0).min(100.0)
        };

        AssessmentStats {
            average_score,
            completion_rate,
            graded_count: graded.len(),
            pending_count: self
                .submissions
                .iter()
                .filter(|s| s.status == SubmissionStatus::Pending)
                .count(),
        }
    }
}
