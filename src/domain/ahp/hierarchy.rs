//! Hierarchy - Goal, criteria, alternatives and their comparison matrices.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::{AhpError, ComparisonMatrix};

/// Fewest criteria or alternatives a hierarchy may hold.
pub const MIN_ENTITIES: usize = 2;

/// Most criteria or alternatives a hierarchy may hold (random index table size).
pub const MAX_ENTITIES: usize = 15;

/// The two named entity sets of a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Criterion,
    Alternative,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Criterion => "criterion",
            EntityKind::Alternative => "alternative",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Criterion => "criteria",
            EntityKind::Alternative => "alternatives",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Addresses one comparison matrix inside a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixRef {
    /// The top-level criteria-vs-criteria matrix.
    Criteria,
    /// Alternatives compared under the named criterion.
    Alternatives(String),
}

/// Cardinality bounds applied by `validate` and the add/remove operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyLimits {
    pub min_entities: usize,
    pub max_entities: usize,
}

impl Default for HierarchyLimits {
    fn default() -> Self {
        Self {
            min_entities: MIN_ENTITIES,
            max_entities: MAX_ENTITIES,
        }
    }
}

/// Outcome of structural validation; lists every violation found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Size overview of a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchySummary {
    pub goal: String,
    pub criteria_count: usize,
    pub alternative_count: usize,
    /// One criteria matrix plus one alternative matrix per criterion.
    pub total_matrices: usize,
    /// Upper-triangle judgments across every matrix.
    pub total_comparisons: usize,
}

/// Plain field bundle used for deserialization; converted through
/// [`Hierarchy::from_parts`] so the structural invariants always hold.
///
/// Matrices may be omitted: a document holding only the goal and the
/// names starts with neutral judgments.
#[derive(Debug, Clone, Deserialize)]
struct HierarchyParts {
    goal: String,
    criteria: Vec<String>,
    alternatives: Vec<String>,
    #[serde(default)]
    criteria_matrix: Option<ComparisonMatrix>,
    #[serde(default)]
    alternative_matrices: BTreeMap<String, ComparisonMatrix>,
}

impl TryFrom<HierarchyParts> for Hierarchy {
    type Error = AhpError;

    fn try_from(parts: HierarchyParts) -> Result<Self, Self::Error> {
        let criteria_matrix = parts
            .criteria_matrix
            .unwrap_or_else(|| ComparisonMatrix::neutral(parts.criteria.len()));

        let mut alternative_matrices = parts.alternative_matrices;
        for criterion in &parts.criteria {
            alternative_matrices
                .entry(criterion.clone())
                .or_insert_with(|| ComparisonMatrix::neutral(parts.alternatives.len()));
        }

        Hierarchy::from_parts(
            parts.goal,
            parts.criteria,
            parts.alternatives,
            criteria_matrix,
            alternative_matrices,
        )
    }
}

/// A decision hierarchy: one goal, criteria, alternatives and judgments.
///
/// Owns the criteria matrix (order = criteria count) and one alternative
/// matrix per criterion (order = alternative count). Every mutating
/// operation either applies completely or leaves the hierarchy untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HierarchyParts")]
pub struct Hierarchy {
    goal: String,
    criteria: Vec<String>,
    alternatives: Vec<String>,
    criteria_matrix: ComparisonMatrix,
    alternative_matrices: BTreeMap<String, ComparisonMatrix>,
    #[serde(skip)]
    limits: HierarchyLimits,
}

impl Hierarchy {
    /// Creates a hierarchy with neutral judgments everywhere.
    ///
    /// Names are trimmed. Fails on blank or duplicate names and on entity
    /// counts outside the default limits.
    pub fn new(
        goal: impl Into<String>,
        criteria: Vec<String>,
        alternatives: Vec<String>,
    ) -> Result<Self, AhpError> {
        let limits = HierarchyLimits::default();
        let criteria = Self::checked_names(EntityKind::Criterion, criteria, &limits)?;
        let alternatives = Self::checked_names(EntityKind::Alternative, alternatives, &limits)?;

        let alternative_matrices = criteria
            .iter()
            .map(|c| {
                let matrix = ComparisonMatrix::neutral(alternatives.len());
                (c.clone(), matrix)
            })
            .collect();

        Ok(Self {
            goal: goal.into().trim().to_string(),
            criteria_matrix: ComparisonMatrix::neutral(criteria.len()),
            criteria,
            alternatives,
            alternative_matrices,
            limits,
        })
    }

    /// Assembles a hierarchy from existing judgments.
    ///
    /// Checks that matrix orders match the name sets and that every
    /// criterion has exactly one alternative matrix. Cardinality and
    /// duplicate names are left to [`Hierarchy::validate`].
    pub fn from_parts(
        goal: String,
        criteria: Vec<String>,
        alternatives: Vec<String>,
        criteria_matrix: ComparisonMatrix,
        alternative_matrices: BTreeMap<String, ComparisonMatrix>,
    ) -> Result<Self, AhpError> {
        if criteria_matrix.order() != criteria.len() {
            return Err(AhpError::invalid_matrix(format!(
                "criteria matrix has order {} but there are {} criteria",
                criteria_matrix.order(),
                criteria.len()
            )));
        }

        for criterion in &criteria {
            let matrix = alternative_matrices.get(criterion).ok_or_else(|| {
                AhpError::incomplete(format!(
                    "criterion '{}' has no alternative matrix",
                    criterion
                ))
            })?;
            if matrix.order() != alternatives.len() {
                return Err(AhpError::invalid_matrix(format!(
                    "alternative matrix for '{}' has order {} but there are {} alternatives",
                    criterion,
                    matrix.order(),
                    alternatives.len()
                )));
            }
        }

        if let Some(extra) = alternative_matrices
            .keys()
            .find(|key| !criteria.contains(key))
        {
            return Err(AhpError::UnknownCriterion(extra.clone()));
        }

        Ok(Self {
            goal,
            criteria,
            alternatives,
            criteria_matrix,
            alternative_matrices,
            limits: HierarchyLimits::default(),
        })
    }

    /// Replaces the cardinality limits used by validation and editing.
    pub fn with_limits(mut self, limits: HierarchyLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> HierarchyLimits {
        self.limits
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn names(&self, kind: EntityKind) -> &[String] {
        match kind {
            EntityKind::Criterion => &self.criteria,
            EntityKind::Alternative => &self.alternatives,
        }
    }

    pub fn index_of(&self, kind: EntityKind, name: &str) -> Option<usize> {
        self.names(kind).iter().position(|n| n == name)
    }

    pub fn criteria_matrix(&self) -> &ComparisonMatrix {
        &self.criteria_matrix
    }

    pub fn alternative_matrix(&self, criterion: &str) -> Option<&ComparisonMatrix> {
        self.alternative_matrices.get(criterion)
    }

    /// Resolves a matrix reference.
    pub fn matrix(&self, matrix_ref: &MatrixRef) -> Result<&ComparisonMatrix, AhpError> {
        match matrix_ref {
            MatrixRef::Criteria => Ok(&self.criteria_matrix),
            MatrixRef::Alternatives(criterion) => self
                .alternative_matrices
                .get(criterion)
                .ok_or_else(|| AhpError::UnknownCriterion(criterion.clone())),
        }
    }

    /// Sets the decision goal. Blank goals are reported by `validate`.
    pub fn set_goal(&mut self, goal: impl Into<String>) {
        self.goal = goal.into().trim().to_string();
    }

    /// Checks the structure, collecting every violation.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        if self.goal.trim().is_empty() {
            errors.push("Decision goal must not be empty".to_string());
        }

        for kind in [EntityKind::Criterion, EntityKind::Alternative] {
            let names = self.names(kind);
            if names.len() < self.limits.min_entities {
                errors.push(format!(
                    "At least {} {} are required",
                    self.limits.min_entities,
                    kind.plural()
                ));
            }
            if names.len() > self.limits.max_entities {
                errors.push(format!(
                    "At most {} {} are allowed",
                    self.limits.max_entities,
                    kind.plural()
                ));
            }
            let unique: HashSet<&String> = names.iter().collect();
            if unique.len() != names.len() {
                errors.push(format!("{} names must be unique", capitalize(kind.label())));
            }
        }

        ValidationResult::from_errors(errors)
    }

    /// Appends a new entity and grows the affected matrices with neutral
    /// judgments. Returns the index of the new entity.
    ///
    /// # Errors
    /// - `EmptyName` if the trimmed name is empty
    /// - `DuplicateName` if the name is already present
    /// - `MaximumCardinality` if the set is full
    pub fn add_entity(&mut self, kind: EntityKind, name: &str) -> Result<usize, AhpError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AhpError::EmptyName { kind });
        }
        if self.names(kind).iter().any(|n| n == name) {
            return Err(AhpError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
        if self.names(kind).len() >= self.limits.max_entities {
            return Err(AhpError::MaximumCardinality {
                kind,
                max: self.limits.max_entities,
            });
        }

        match kind {
            EntityKind::Criterion => {
                self.criteria_matrix = self.criteria_matrix.with_appended_entity();
                self.alternative_matrices.insert(
                    name.to_string(),
                    ComparisonMatrix::neutral(self.alternatives.len()),
                );
                self.criteria.push(name.to_string());
            }
            EntityKind::Alternative => {
                for matrix in self.alternative_matrices.values_mut() {
                    *matrix = matrix.with_appended_entity();
                }
                self.alternatives.push(name.to_string());
            }
        }

        Ok(self.names(kind).len() - 1)
    }

    /// Removes the entity at `index` and its row/column everywhere.
    /// Returns the removed name.
    ///
    /// # Errors
    /// - `InvalidIndex` if `index` is out of bounds
    /// - `MinimumCardinality` if fewer than the minimum would remain
    pub fn remove_entity(&mut self, kind: EntityKind, index: usize) -> Result<String, AhpError> {
        let count = self.names(kind).len();
        if index >= count {
            return Err(AhpError::InvalidIndex { kind, index, count });
        }
        if count <= self.limits.min_entities {
            return Err(AhpError::MinimumCardinality {
                kind,
                min: self.limits.min_entities,
            });
        }

        match kind {
            EntityKind::Criterion => {
                let criteria_matrix = self.criteria_matrix.without_entity(index)?;
                let removed = self.criteria.remove(index);
                self.criteria_matrix = criteria_matrix;
                if !self.criteria.contains(&removed) {
                    self.alternative_matrices.remove(&removed);
                }
                Ok(removed)
            }
            EntityKind::Alternative => {
                let shrunk = self
                    .alternative_matrices
                    .iter()
                    .map(|(criterion, matrix)| {
                        Ok((criterion.clone(), matrix.without_entity(index)?))
                    })
                    .collect::<Result<BTreeMap<_, _>, AhpError>>()?;
                self.alternative_matrices = shrunk;
                Ok(self.alternatives.remove(index))
            }
        }
    }

    /// Renames the entity at `index`; judgments are unchanged.
    ///
    /// Renaming to the current name is a successful no-op.
    pub fn rename_entity(
        &mut self,
        kind: EntityKind,
        index: usize,
        new_name: &str,
    ) -> Result<(), AhpError> {
        let count = self.names(kind).len();
        if index >= count {
            return Err(AhpError::InvalidIndex { kind, index, count });
        }
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AhpError::EmptyName { kind });
        }

        let old_name = self.names(kind)[index].clone();
        if old_name == new_name {
            return Ok(());
        }
        if self.names(kind).iter().any(|n| n == new_name) {
            return Err(AhpError::DuplicateName {
                kind,
                name: new_name.to_string(),
            });
        }

        match kind {
            EntityKind::Criterion => {
                self.criteria[index] = new_name.to_string();
                let still_used = self.criteria.contains(&old_name);
                let matrix = if still_used {
                    self.alternative_matrices.get(&old_name).cloned()
                } else {
                    self.alternative_matrices.remove(&old_name)
                };
                if let Some(matrix) = matrix {
                    self.alternative_matrices.insert(new_name.to_string(), matrix);
                }
            }
            EntityKind::Alternative => {
                self.alternatives[index] = new_name.to_string();
            }
        }

        Ok(())
    }

    /// Records a judgment in the referenced matrix, writing the reciprocal
    /// cell in the same step.
    pub fn set_matrix_entry(
        &mut self,
        matrix_ref: &MatrixRef,
        row: usize,
        col: usize,
        value: f64,
    ) -> Result<(), AhpError> {
        let matrix = match matrix_ref {
            MatrixRef::Criteria => &mut self.criteria_matrix,
            MatrixRef::Alternatives(criterion) => self
                .alternative_matrices
                .get_mut(criterion)
                .ok_or_else(|| AhpError::UnknownCriterion(criterion.clone()))?,
        };
        matrix.set_judgment(row, col, value)
    }

    pub fn summary(&self) -> HierarchySummary {
        let c = self.criteria.len();
        let a = self.alternatives.len();
        HierarchySummary {
            goal: self.goal.clone(),
            criteria_count: c,
            alternative_count: a,
            total_matrices: 1 + c,
            total_comparisons: c * c.saturating_sub(1) / 2 + c * (a * a.saturating_sub(1) / 2),
        }
    }

    fn checked_names(
        kind: EntityKind,
        names: Vec<String>,
        limits: &HierarchyLimits,
    ) -> Result<Vec<String>, AhpError> {
        let mut checked: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AhpError::EmptyName { kind });
            }
            if checked.contains(&name) {
                return Err(AhpError::DuplicateName { kind, name });
            }
            checked.push(name);
        }

        if checked.len() < limits.min_entities {
            return Err(AhpError::MinimumCardinality {
                kind,
                min: limits.min_entities,
            });
        }
        if checked.len() > limits.max_entities {
            return Err(AhpError::MaximumCardinality {
                kind,
                max: limits.max_entities,
            });
        }
        Ok(checked)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
