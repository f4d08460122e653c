//! Full triage run: link, then diagnose, then rank.
//!
//! The three stages stay independently callable; this type just wires the
//! typical flow where the linker's matched requirement feeds the other two.

use serde::{Deserialize, Serialize};

use crate::assignment::AssignmentScorer;
use crate::diagnoser::Diagnoser;
use crate::domain::{AssignmentResult, Defect, Diagnosis, MatchResult, Result};
use crate::linker::Linker;

/// Combined report for one defect.
///
/// `diagnosis` and `assignment` are `None` only when linking produced no
/// requirement (empty catalog): there is nothing to diagnose against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageReport {
    pub link: MatchResult,
    pub diagnosis: Option<Diagnosis>,
    pub assignment: Option<AssignmentResult>,
}

/// Sequential orchestration of the three stages for one defect.
#[derive(Clone)]
pub struct TriagePipeline {
    linker: Linker,
    diagnoser: Diagnoser,
    scorer: AssignmentScorer,
}

impl TriagePipeline {
    pub fn new(linker: Linker, diagnoser: Diagnoser, scorer: AssignmentScorer) -> Self {
        Self {
            linker,
            diagnoser,
            scorer,
        }
    }

    pub fn linker(&self) -> &Linker {
        &self.linker
    }

    pub fn diagnoser(&self) -> &Diagnoser {
        &self.diagnoser
    }

    pub fn scorer(&self) -> &AssignmentScorer {
        &self.scorer
    }

    /// Run the full flow for one defect.
    pub async fn run(&self, defect: &Defect) -> Result<TriageReport> {
        let link = self.linker.link(&defect.description).await?;

        let (diagnosis, assignment) = match &link.requirement {
            Some(requirement) => {
                let diagnosis = self.diagnoser.diagnose(defect, requirement).await;
                let assignment = self.scorer.rank(&requirement.id).await?;
                (Some(diagnosis), Some(assignment))
            }
            None => (None, None),
        };

        Ok(TriageReport {
            link,
            diagnosis,
            assignment,
        })
    }
}
