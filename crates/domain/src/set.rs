use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{CreateError, DeleteError, ExerciseID, UpdateError};

#[allow(async_fn_in_trait)]
pub trait SetRepository {
    async fn create_set(&self, exercise_id: ExerciseID, set: NewSet) -> Result<Set, CreateError>;
    async fn create_sets(
        &self,
        exercise_id: ExerciseID,
        sets: Vec<NewSet>,
    ) -> Result<Vec<Set>, CreateError>;
    async fn replace_set(&self, set: Set) -> Result<Set, UpdateError>;
    async fn delete_set(&self, id: SetID) -> Result<SetID, DeleteError>;
    async fn create_dropset_entries(
        &self,
        set_id: SetID,
        entries: Vec<NewDropsetEntry>,
    ) -> Result<Vec<DropsetEntry>, CreateError>;
    async fn delete_dropset_entry(&self, id: DropsetEntryID)
    -> Result<DropsetEntryID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait SetService {
    async fn create_set(&self, exercise_id: ExerciseID, set: NewSet) -> Result<Set, CreateError>;
    async fn create_sets(
        &self,
        exercise_id: ExerciseID,
        sets: Vec<NewSet>,
    ) -> Result<Vec<Set>, CreateError>;
    async fn replace_set(&self, set: Set) -> Result<Set, UpdateError>;
    async fn delete_set(&self, id: SetID) -> Result<SetID, DeleteError>;
    async fn create_dropset_entries(
        &self,
        set_id: SetID,
        entries: Vec<NewDropsetEntry>,
    ) -> Result<Vec<DropsetEntry>, CreateError>;
    async fn delete_dropset_entry(&self, id: DropsetEntryID)
    -> Result<DropsetEntryID, DeleteError>;
}

/// One performed set. `reps` and `weight` are optional because historical
/// rows may carry null or out-of-range values; statistics fill in zero
/// instead of failing (see `statistics`).
#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub id: SetID,
    pub exercise_id: ExerciseID,
    pub position: u32,
    pub reps: Option<Reps>,
    pub weight: Option<Weight>,
    pub rest_time: Option<RestTime>,
    pub is_dropset: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSet {
    pub position: u32,
    pub reps: Reps,
    pub weight: Weight,
    pub rest_time: Option<RestTime>,
    pub is_dropset: bool,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl SetID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Reduced-weight continuation block performed right after the owning set.
/// May exist regardless of the owning set's `is_dropset` flag, which is a
/// display hint rather than an integrity constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct DropsetEntry {
    pub id: DropsetEntryID,
    pub set_id: SetID,
    pub position: u32,
    pub reps: Option<Reps>,
    pub weight: Option<Weight>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDropsetEntry {
    pub position: u32,
    pub reps: Reps,
    pub weight: Weight,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DropsetEntryID(Uuid);

impl DropsetEntryID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for DropsetEntryID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for DropsetEntryID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// A set joined to its dropset entries, as returned by nested-join reads.
#[derive(Debug, Clone, PartialEq)]
pub struct SetWithDropsets {
    pub set: Set,
    pub dropsets: Vec<DropsetEntry>,
}

impl SetWithDropsets {
    /// Volume of the main set plus all of its dropset entries, with absent
    /// reps/weight counted as zero.
    #[must_use]
    pub fn volume(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let block = |reps: Option<Reps>, weight: Option<Weight>| {
            reps.map_or(0, u32::from) as f32 * weight.map_or(0.0, f32::from)
        };
        block(self.set.reps, self.set.weight)
            + self
                .dropsets
                .iter()
                .map(|d| block(d.reps, d.weight))
                .sum::<f32>()
    }
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(1..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 1 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct RestTime(u32);

impl RestTime {
    pub fn new(value: u32) -> Result<Self, RestTimeError> {
        if !(0..10000).contains(&value) {
            return Err(RestTimeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for RestTime {
    type Error = RestTimeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => RestTime::new(parsed_value),
            Err(_) => Err(RestTimeError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RestTimeError {
    #[error("Rest time must be in the range 0 to 9999 s")]
    OutOfRange,
    #[error("Rest time must be an integer")]
    ParseError,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1", Ok(Reps(1)))]
    #[case("999", Ok(Reps(999)))]
    #[case("0", Err(RepsError::OutOfRange))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("eight", Err(RepsError::ParseError))]
    fn test_reps_try_from(#[case] value: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(value), expected);
    }

    #[rstest]
    #[case("0.0", Ok(Weight(0.0)))]
    #[case("102.5", Ok(Weight(102.5)))]
    #[case("999.9", Ok(Weight(999.9)))]
    #[case("-0.1", Err(WeightError::OutOfRange))]
    #[case("1000.0", Err(WeightError::OutOfRange))]
    #[case("20.05", Err(WeightError::InvalidResolution))]
    #[case("heavy", Err(WeightError::ParseError))]
    fn test_weight_try_from(#[case] value: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(value), expected);
    }

    #[rstest]
    #[case("0", Ok(RestTime(0)))]
    #[case("90", Ok(RestTime(90)))]
    #[case("10000", Err(RestTimeError::OutOfRange))]
    #[case("long", Err(RestTimeError::ParseError))]
    fn test_rest_time_try_from(
        #[case] value: &str,
        #[case] expected: Result<RestTime, RestTimeError>,
    ) {
        assert_eq!(RestTime::try_from(value), expected);
    }

    #[test]
    fn test_set_with_dropsets_volume() {
        let set = SetWithDropsets {
            set: Set {
                id: 1.into(),
                exercise_id: 1.into(),
                position: 0,
                reps: Some(Reps(8)),
                weight: Some(Weight(60.0)),
                rest_time: None,
                is_dropset: true,
            },
            dropsets: vec![
                DropsetEntry {
                    id: 1.into(),
                    set_id: 1.into(),
                    position: 0,
                    reps: Some(Reps(6)),
                    weight: Some(Weight(40.0)),
                },
                DropsetEntry {
                    id: 2.into(),
                    set_id: 1.into(),
                    position: 1,
                    reps: Some(Reps(4)),
                    weight: None,
                },
            ],
        };
        assert_eq!(set.volume(), 8.0 * 60.0 + 6.0 * 40.0);
    }

    #[test]
    fn test_set_id_nil() {
        assert!(SetID::nil().is_nil());
        assert_eq!(SetID::nil(), SetID::default());
    }

    #[test]
    fn test_dropset_entry_id_nil() {
        assert!(DropsetEntryID::nil().is_nil());
        assert_eq!(DropsetEntryID::nil(), DropsetEntryID::default());
    }
}
