use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Service categories employees register under. Wire spelling is kept as the
/// backend stores it, including "Diagonistic".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FieldOfWork {
    Ambulance,
    Autos,
    Diagonistic,
    Electricians,
    Painters,
    Photographers,
    Plumbers,
    Saloon,
}

impl FieldOfWork {
    pub const ALL: [FieldOfWork; 8] = [
        FieldOfWork::Ambulance,
        FieldOfWork::Autos,
        FieldOfWork::Diagonistic,
        FieldOfWork::Electricians,
        FieldOfWork::Painters,
        FieldOfWork::Photographers,
        FieldOfWork::Plumbers,
        FieldOfWork::Saloon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldOfWork::Ambulance => "Ambulance",
            FieldOfWork::Autos => "Autos",
            FieldOfWork::Diagonistic => "Diagonistic",
            FieldOfWork::Electricians => "Electricians",
            FieldOfWork::Painters => "Painters",
            FieldOfWork::Photographers => "Photographers",
            FieldOfWork::Plumbers => "Plumbers",
            FieldOfWork::Saloon => "Saloon",
        }
    }

    pub fn empty_state(&self) -> &'static str {
        match self {
            FieldOfWork::Ambulance => "No ambulance employees found.",
            FieldOfWork::Autos => "No autos employees found.",
            FieldOfWork::Diagonistic => "No diagnostic employees found.",
            FieldOfWork::Electricians => "No electricians found.",
            FieldOfWork::Painters => "No painters found.",
            FieldOfWork::Photographers => "No photographers found.",
            FieldOfWork::Plumbers => "No plumbers found.",
            FieldOfWork::Saloon => "No saloon employees found.",
        }
    }
}

impl fmt::Display for FieldOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldOfWork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        // "diagnostic" is accepted as the correctly spelled alias
        if wanted == "diagnostic" {
            return Ok(FieldOfWork::Diagonistic);
        }
        FieldOfWork::ALL
            .into_iter()
            .find(|field| field.as_str().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown field of work: {s}"))
    }
}

/// Worker entry as returned by `employeesByField`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub field_of_work: FieldOfWork,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Payload of `POST /api/authRoutes/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSignup {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub aadhar: String,
    pub bank_account: String,
    pub password: String,
    pub field_of_work: FieldOfWork,
}
