//! Search criteria for employee queries
//!
//! An [`Employee`] used as an example becomes a list of [`FilterCondition`]s,
//! one per non-empty name field. Conditions are ANDed; an empty list matches
//! every record.
//!
//! ```rust
//! use employee_service::model::Employee;
//! use employee_service::repository::{EmployeeColumn, SearchCriteria};
//!
//! let example = Employee { first_name: Some("Jo".into()), ..Default::default() };
//! let criteria = SearchCriteria::from_example(Some(&example));
//!
//! assert_eq!(criteria.filters().len(), 1);
//! assert_eq!(criteria.filters()[0].column, EmployeeColumn::FirstName);
//! assert!(criteria.matches(&Employee::new("John", "Smith")));
//! assert!(!criteria.matches(&Employee::new("john", "Smith")));
//! ```

use std::fmt;

use crate::model::Employee;

/// Searchable employee columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeColumn {
    FirstName,
    LastName,
}

impl EmployeeColumn {
    /// Column name in the `employee` table
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
        }
    }

    /// Read this column's value from an employee
    pub fn value_of(self, employee: &Employee) -> Option<&str> {
        match self {
            Self::FirstName => employee.first_name.as_deref(),
            Self::LastName => employee.last_name.as_deref(),
        }
    }
}

impl fmt::Display for EmployeeColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Case-sensitive substring match on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub column: EmployeeColumn,
    pub value: String,
}

impl FilterCondition {
    /// Match records whose `column` contains `value`
    pub fn contains(column: EmployeeColumn, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    /// SQL `LIKE` pattern for this condition, to be used with `ESCAPE '\'`
    ///
    /// `%`, `_` and `\` in the value are escaped so they match literally.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.value.len() + 2);
        pattern.push('%');
        for ch in self.value.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    /// Evaluate the condition against an in-memory record
    pub fn matches(&self, employee: &Employee) -> bool {
        self.column
            .value_of(employee)
            .is_some_and(|v| v.contains(self.value.as_str()))
    }
}

/// A conjunction of filter conditions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    filters: Vec<FilterCondition>,
}

impl SearchCriteria {
    /// Criteria matching every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Build criteria from an example record
    ///
    /// Only `firstName` and `lastName` take part; empty or absent values add
    /// no condition, and `None` yields [`SearchCriteria::all`].
    pub fn from_example(example: Option<&Employee>) -> Self {
        let Some(example) = example else {
            return Self::all();
        };

        let filters = [EmployeeColumn::FirstName, EmployeeColumn::LastName]
            .into_iter()
            .filter_map(|column| {
                column
                    .value_of(example)
                    .filter(|v| !v.is_empty())
                    .map(|v| FilterCondition::contains(column, v))
            })
            .collect();

        Self { filters }
    }

    /// The conditions, in column order
    pub fn filters(&self) -> &[FilterCondition] {
        &self.filters
    }

    /// True when the criteria select every record
    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty()
    }

    /// Evaluate all conditions against an in-memory record
    pub fn matches(&self, employee: &Employee) -> bool {
        self.filters.iter().all(|f| f.matches(employee))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_matches_everything() {
        let criteria = SearchCriteria::from_example(None);
        assert!(criteria.is_unfiltered());
        assert!(criteria.matches(&Employee::default()));
    }

    #[test]
    fn test_empty_strings_add_no_condition() {
        let example = Employee {
            id: Some(7),
            first_name: Some(String::new()),
            last_name: None,
        };
        assert_eq!(SearchCriteria::from_example(Some(&example)), SearchCriteria::all());
    }

    #[test]
    fn test_both_names_are_anded() {
        let example = Employee::new("Jo", "Sm");
        let criteria = SearchCriteria::from_example(Some(&example));
        assert_eq!(criteria.filters().len(), 2);

        assert!(criteria.matches(&Employee::new("John", "Smith")));
        assert!(!criteria.matches(&Employee::new("John", "Appleseed")));
        assert!(!criteria.matches(&Employee::new("Mary", "Smith")));
    }

    #[test]
    fn test_id_is_ignored() {
        let example = Employee::default().with_id(3);
        assert!(SearchCriteria::from_example(Some(&example)).is_unfiltered());
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        let filter = FilterCondition::contains(EmployeeColumn::LastName, r"50%_off\");
        assert_eq!(filter.like_pattern(), r"%50\%\_off\\%");

        let plain = FilterCondition::contains(EmployeeColumn::FirstName, "Jo");
        assert_eq!(plain.like_pattern(), "%Jo%");
    }

    #[test]
    fn test_match_is_literal_and_case_sensitive() {
        let filter = FilterCondition::contains(EmployeeColumn::FirstName, "J_n");
        assert!(!filter.matches(&Employee::new("Jon", "Snow")));
        assert!(filter.matches(&Employee::new("J_nior", "Snow")));

        let filter = FilterCondition::contains(EmployeeColumn::FirstName, "jo");
        assert!(!filter.matches(&Employee::new("John", "Smith")));
    }

    #[test]
    fn test_missing_column_value_never_matches() {
        let filter = FilterCondition::contains(EmployeeColumn::LastName, "a");
        assert!(!filter.matches(&Employee::default()));
    }
}
