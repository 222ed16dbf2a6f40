//! Department registry types and the fixed municipal seed list.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable department identifier assigned by the relational store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct DepartmentId(i32);

impl DepartmentId {
    /// Wrap a store-assigned identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for DepartmentId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Organizational unit complaints are triaged into.
///
/// ## Invariants
/// - `name` is unique in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(from = "DepartmentDto", into = "DepartmentDto")]
pub struct Department {
    #[schema(value_type = i32, example = 3)]
    id: DepartmentId,
    #[schema(example = "Departamento de Vialidad")]
    name: String,
    description: Option<String>,
}

impl Department {
    /// Build a department from store-validated components.
    pub const fn new(id: DepartmentId, name: String, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    /// Stable department identifier.
    pub const fn id(&self) -> DepartmentId {
        self.id
    }

    /// Unique department name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-text description shown to citizens.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DepartmentDto {
    id: i32,
    name: String,
    description: Option<String>,
}

impl From<Department> for DepartmentDto {
    fn from(value: Department) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            description: value.description,
        }
    }
}

impl From<DepartmentDto> for Department {
    fn from(value: DepartmentDto) -> Self {
        Self {
            id: DepartmentId::new(value.id),
            name: value.name,
            description: value.description,
        }
    }
}

/// Department awaiting insertion; identifiers come from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDepartment {
    /// Unique department name.
    pub name: String,
    /// Free-text description shown to citizens.
    pub description: Option<String>,
}

/// Fixed municipal organizational units inserted once at startup.
///
/// Order matters: the registry seeds these in source order so identifiers are
/// stable across fresh deployments.
pub const DEFAULT_DEPARTMENTS: [(&str, &str); 6] = [
    ("Departamento de Vialidad", "Gestión de infraestructura vial"),
    ("Departamento de Educación", "Gestión educativa municipal"),
    (
        "Departamento de Obras Públicas",
        "Gestión de obras municipales",
    ),
    ("Departamento de Seguridad", "Gestión de seguridad ciudadana"),
    ("Departamento de Salud", "Gestión de salud municipal"),
    (
        "Departamento de Desarrollo Social",
        "Gestión de programas sociales",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_list_has_six_unique_names() {
        let mut names: Vec<&str> = DEFAULT_DEPARTMENTS.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn department_serializes_camel_case() {
        let department = Department::new(
            DepartmentId::new(3),
            "Departamento de Salud".to_owned(),
            Some("Gestión de salud municipal".to_owned()),
        );
        let value = serde_json::to_value(department).expect("serialize department");
        assert_eq!(value["id"], 3);
        assert_eq!(value["name"], "Departamento de Salud");
        assert_eq!(value["description"], "Gestión de salud municipal");
    }
}
