//! The recipe data model: renames, merge strategy, synthesized columns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MelangeError, Result};

/// How multiple input tables are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Stack rows, aligned by header name to the first table's headers.
    #[default]
    Append,
    /// Inner join of exactly two tables on a shared key column.
    Join,
}

/// A single header rename. Applying a mapping whose source header is
/// absent is a no-op, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub source_column: String,
    pub target_column: String,
}

impl ColumnMapping {
    pub fn new(source_column: impl Into<String>, target_column: impl Into<String>) -> Self {
        Self {
            source_column: source_column.into(),
            target_column: target_column.into(),
        }
    }
}

/// One condition → value rule of a conditional column.
///
/// The condition grammar is `[Column] OP 'literal'` with OP one of
/// `===`, `!==`, `==`, `!=`. Anything else evaluates to false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalRule {
    pub condition: String,
    pub value: String,
}

impl ConditionalRule {
    pub fn new(condition: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            value: value.into(),
        }
    }
}

/// How the value of a synthesized column is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnSource {
    /// Every row gets the literal value.
    Fixed { value: String },
    /// `[Column]` placeholders substituted per row, concatenation only.
    Formula { expression: String },
    /// First rule whose condition holds wins; no match yields "".
    Conditional { rules: Vec<ConditionalRule> },
}

/// A column appended to the output table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewColumn {
    pub name: String,
    #[serde(flatten)]
    pub source: ColumnSource,
}

impl NewColumn {
    /// A column holding the same literal value in every row.
    pub fn fixed(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ColumnSource::Fixed { value: value.into() },
        }
    }

    /// A column computed from a concatenation formula.
    pub fn formula(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ColumnSource::Formula {
                expression: expression.into(),
            },
        }
    }

    /// A column computed from first-match conditional rules.
    pub fn conditional(name: impl Into<String>, rules: Vec<ConditionalRule>) -> Self {
        Self {
            name: name.into(),
            source: ColumnSource::Conditional { rules },
        }
    }
}

/// A named, reusable transformation: column renames, merge strategy, and
/// synthesized columns.
///
/// Recipes returned from the store are value snapshots; mutating one has
/// no effect until it is saved again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier, assigned by the store on save.
    #[serde(default)]
    pub id: String,

    /// Display name. Required non-blank for saving.
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Expected input file name patterns. Informational only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_files: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_mappings: Vec<ColumnMapping>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_columns: Vec<NewColumn>,

    #[serde(default)]
    pub merge_strategy: MergeStrategy,

    /// Key column for the join strategy. Required iff joining.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_column: Option<String>,

    /// When the recipe was saved.
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,

    /// When the recipe was last successfully applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Create a draft recipe with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_recipe_id(),
            name: name.into(),
            description: String::new(),
            source_files: Vec::new(),
            column_mappings: Vec::new(),
            new_columns: Vec::new(),
            merge_strategy: MergeStrategy::Append,
            join_column: None,
            created: Utc::now(),
            last_used: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a header rename.
    pub fn with_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.column_mappings.push(mapping);
        self
    }

    /// Add a synthesized column.
    pub fn with_new_column(mut self, column: NewColumn) -> Self {
        self.new_columns.push(column);
        self
    }

    /// Use the join strategy on the given key column.
    pub fn joining_on(mut self, column: impl Into<String>) -> Self {
        self.merge_strategy = MergeStrategy::Join;
        self.join_column = Some(column.into());
        self
    }

    /// Check the recipe's structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MelangeError::InvalidRecipe(
                "recipe name must not be empty".to_string(),
            ));
        }
        if self.merge_strategy == MergeStrategy::Join
            && self.join_column.as_deref().is_none_or(|c| c.trim().is_empty())
        {
            return Err(MelangeError::InvalidRecipe(
                "join strategy requires a join column".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generate a unique recipe ID. Stable across process restarts, unlike a
/// session counter: recipes outlive the process that created them.
pub(crate) fn generate_recipe_id() -> String {
    format!("rcp_{}_{:08x}", Utc::now().timestamp_millis(), fastrand::u32(..))
}
