use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Account role. Stored by name in the `user.role` column.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Teacher => "Teacher",
            Self::Student => "Student",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            _ => Err(format!("Unknown role '{}'", value)),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct RegisterDto {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `Teacher`, `Student` or `Admin` (admin sessions only).
    pub role: String,
    #[serde(default)]
    pub contact_info: Option<String>,
    /// Instrument taught for teachers, instrument of interest for students.
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub referral_source: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct AuthUserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}
