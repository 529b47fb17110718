//! Password hashing and strength estimation.
//!
//! Hashing uses bcrypt at its default cost. The strength estimator is a cheap
//! heuristic run at registration time; it scores length and character variety
//! and penalizes common passwords, sequences and reuse of the user's own data.

use bcrypt::{DEFAULT_COST, hash, verify};
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::AppError;

const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "123456",
    "12345678",
    "123456789",
    "1234567890",
    "qwerty",
    "qwerty123",
    "letmein",
    "welcome",
    "iloveyou",
    "admin",
    "abc123",
    "monkey",
    "dragon",
    "football",
    "baseball",
    "sunshine",
    "trustno1",
    "netflix",
    "starwars",
];

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(AppError::internal)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash).map_err(AppError::internal)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

/// Result of [`evaluate_password`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PasswordStrength {
    /// Raw score, 0 to 7.
    pub score: u8,
    pub level: StrengthLevel,
    pub suggestions: Vec<String>,
}

impl PasswordStrength {
    /// Passwords below `Fair` are rejected at registration.
    #[must_use]
    pub fn is_acceptable(&self) -> bool {
        self.level >= StrengthLevel::Fair
    }
}

/// Scores a password. `user_inputs` are values the password should not contain,
/// such as the email local part or the display name.
#[must_use]
pub fn evaluate_password(password: &str, user_inputs: &[&str]) -> PasswordStrength {
    let mut suggestions = Vec::new();
    let length = password.chars().count();
    let lowered = password.to_lowercase();

    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        return PasswordStrength {
            score: 0,
            level: StrengthLevel::VeryWeak,
            suggestions: vec!["This is a commonly used password".to_string()],
        };
    }

    let mut chars = password.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return PasswordStrength {
                score: 0,
                level: StrengthLevel::VeryWeak,
                suggestions: vec!["Avoid repeating a single character".to_string()],
            };
        }
    }

    let mut score: i32 = 0;

    if length >= 8 {
        score += 1;
    } else {
        suggestions.push("Use at least 8 characters".to_string());
    }
    if length >= 12 {
        score += 1;
    }
    if length >= 16 {
        score += 1;
    }

    if password.chars().any(|c| c.is_lowercase()) {
        score += 1;
    } else {
        suggestions.push("Add lowercase letters".to_string());
    }
    if password.chars().any(|c| c.is_uppercase()) {
        score += 1;
    } else {
        suggestions.push("Add uppercase letters".to_string());
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    } else {
        suggestions.push("Add numbers".to_string());
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 1;
    } else {
        suggestions.push("Add symbols".to_string());
    }

    if has_sequence(&lowered, 4) {
        score -= 1;
        suggestions.push("Avoid sequences like 1234 or abcd".to_string());
    }

    let contains_user_input = user_inputs
        .iter()
        .map(|input| input.trim().to_lowercase())
        .filter(|input| input.chars().count() >= 3)
        .any(|input| lowered.contains(&input));
    if contains_user_input {
        score -= 2;
        suggestions.push("Avoid using your name or email in the password".to_string());
    }

    // Short passwords never reach Fair, whatever their variety.
    if length < 8 {
        score = score.min(2);
    }

    let score = score.clamp(0, 7) as u8;
    let level = match score {
        0..=1 => StrengthLevel::VeryWeak,
        2..=3 => StrengthLevel::Weak,
        4 => StrengthLevel::Fair,
        5..=6 => StrengthLevel::Strong,
        _ => StrengthLevel::VeryStrong,
    };

    PasswordStrength {
        score,
        level,
        suggestions,
    }
}

/// True if `run` consecutive characters ascend or descend by one code point.
fn has_sequence(s: &str, run: usize) -> bool {
    let chars: Vec<u32> = s.chars().map(u32::from).collect();
    chars.windows(run).any(|w| {
        let ascending = w.windows(2).all(|p| p[1] == p[0] + 1);
        let descending = w.windows(2).all(|p| p[0] == p[1] + 1);
        ascending || descending
    })
}
