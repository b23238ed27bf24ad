use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG, HEIGHT_RANGE_CM, WEIGHT_RANGE_KG};
use crate::error::ProfileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// A complete profile, as handed to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub gender: Gender,
    pub height_cm: u16,
    pub weight_kg: u16,
}

impl Profile {
    /// The sentence recorded as the system-context turn.
    pub fn context_sentence(&self) -> String {
        format!(
            "User Data: Gender: {}, Height: {} cm, Weight: {} kg.",
            self.gender, self.height_cm, self.weight_kg
        )
    }
}

/// Session-scoped profile inputs. Height and weight may be unset, in which
/// case the chat stays closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStore {
    pub gender: Gender,
    pub height_cm: Option<u16>,
    pub weight_kg: Option<u16>,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self {
            gender: Gender::default(),
            height_cm: Some(DEFAULT_HEIGHT_CM),
            weight_kg: Some(DEFAULT_WEIGHT_KG),
        }
    }
}

impl ProfileStore {
    /// A store with neither height nor weight selected.
    pub fn empty() -> Self {
        Self {
            gender: Gender::default(),
            height_cm: None,
            weight_kg: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.snapshot().is_some()
    }

    pub fn snapshot(&self) -> Option<Profile> {
        Some(Profile {
            gender: self.gender,
            height_cm: self.height_cm?,
            weight_kg: self.weight_kg?,
        })
    }

    /// Replaces every field at once. Nothing changes if any value is out of range.
    pub fn update(&mut self, next: ProfileStore) -> Result<(), ProfileError> {
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    pub fn set_height(&mut self, height_cm: u16) -> Result<(), ProfileError> {
        check_height(height_cm)?;
        self.height_cm = Some(height_cm);
        Ok(())
    }

    pub fn set_weight(&mut self, weight_kg: u16) -> Result<(), ProfileError> {
        check_weight(weight_kg)?;
        self.weight_kg = Some(weight_kg);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if let Some(height) = self.height_cm {
            check_height(height)?;
        }
        if let Some(weight) = self.weight_kg {
            check_weight(weight)?;
        }
        Ok(())
    }
}

fn check_height(value: u16) -> Result<(), ProfileError> {
    if HEIGHT_RANGE_CM.contains(&value) {
        Ok(())
    } else {
        Err(ProfileError::HeightOutOfRange {
            value,
            min: *HEIGHT_RANGE_CM.start(),
            max: *HEIGHT_RANGE_CM.end(),
        })
    }
}

fn check_weight(value: u16) -> Result<(), ProfileError> {
    if WEIGHT_RANGE_KG.contains(&value) {
        Ok(())
    } else {
        Err(ProfileError::WeightOutOfRange {
            value,
            min: *WEIGHT_RANGE_KG.start(),
            max: *WEIGHT_RANGE_KG.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_store_is_complete() {
        let store = ProfileStore::default();
        assert!(store.is_complete());
        assert_eq!(
            store.snapshot(),
            Some(Profile {
                gender: Gender::Male,
                height_cm: 170,
                weight_kg: 70
            })
        );
    }

    #[test]
    fn test_empty_store_is_incomplete() {
        let mut store = ProfileStore::empty();
        assert!(!store.is_complete());

        store.set_height(180).unwrap();
        assert!(!store.is_complete());

        store.set_weight(80).unwrap();
        assert!(store.is_complete());
    }

    #[test]
    fn test_context_sentence() {
        let profile = Profile {
            gender: Gender::Male,
            height_cm: 180,
            weight_kg: 80,
        };
        assert_eq!(
            profile.context_sentence(),
            "User Data: Gender: Male, Height: 180 cm, Weight: 80 kg."
        );
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let mut store = ProfileStore::empty();
        assert!(store.set_height(100).is_ok());
        assert!(store.set_height(250).is_ok());
        assert!(store.set_weight(30).is_ok());
        assert!(store.set_weight(200).is_ok());
    }

    #[test]
    fn test_out_of_range_leaves_store_unchanged() {
        let mut store = ProfileStore::default();

        let err = store.set_height(99).unwrap_err();
        assert_eq!(
            err,
            ProfileError::HeightOutOfRange {
                value: 99,
                min: 100,
                max: 250
            }
        );
        assert!(store.set_weight(201).is_err());

        let err = store
            .update(ProfileStore {
                gender: Gender::Female,
                height_cm: Some(160),
                weight_kg: Some(10),
            })
            .unwrap_err();
        assert!(matches!(err, ProfileError::WeightOutOfRange { value: 10, .. }));
        assert_eq!(store, ProfileStore::default());
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let mut store = ProfileStore::default();
        store
            .update(ProfileStore {
                gender: Gender::Female,
                height_cm: Some(165),
                weight_kg: None,
            })
            .unwrap();
        assert_eq!(store.gender, Gender::Female);
        assert_eq!(store.height_cm, Some(165));
        assert!(!store.is_complete());
    }

    #[test]
    fn test_gender_serde_names() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"Female\"");
        let parsed: Gender = serde_json::from_str("\"Male\"").unwrap();
        assert_eq!(parsed, Gender::Male);
    }
}
