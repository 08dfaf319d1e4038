use crate::error::PipelineError;
use crate::types::RawTable;

/// Names of the four columns the pipeline reads. The defaults match the
/// activity export; callers with differently-labelled sheets remap here
/// instead of renaming headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub person: String,
    pub date: String,
    pub activity: String,
    pub cases: String,
}

impl Default for Schema {
    fn default() -> Self {
        Schema {
            person: "QA Name".to_string(),
            date: "Date".to_string(),
            activity: "Activity Type".to_string(),
            cases: "Cases".to_string(),
        }
    }
}

impl Schema {
    pub fn required(&self) -> [&str; 4] {
        [
            self.person.as_str(),
            self.date.as_str(),
            self.activity.as_str(),
            self.cases.as_str(),
        ]
    }

    /// Column-presence check over the whole table. Extra columns are ignored.
    /// Missing columns are reported in schema order.
    pub fn validate(&self, table: &RawTable) -> Result<(), PipelineError> {
        let missing: Vec<String> = self
            .required()
            .into_iter()
            .filter(|col| !table.has_column(col))
            .map(|col| col.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::Schema { missing })
        }
    }
}
