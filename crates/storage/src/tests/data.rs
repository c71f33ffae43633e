use std::sync::LazyLock;

use chrono::NaiveDate;
use liftlog_domain as domain;

use crate::memory::InMemory;

pub fn store() -> InMemory {
    InMemory::from_json(SNAPSHOT).unwrap()
}

pub static USER: LazyLock<domain::User> = LazyLock::new(|| domain::User {
    id: 1.into(),
    name: domain::Name::new("Alice").unwrap(),
});

pub static USER_2: LazyLock<domain::User> = LazyLock::new(|| domain::User {
    id: 2.into(),
    name: domain::Name::new("Bob").unwrap(),
});

pub static WORKOUT: LazyLock<domain::Workout> = LazyLock::new(|| domain::Workout {
    id: 3.into(),
    user_id: USER.id,
    name: domain::Name::new("Push Day").unwrap(),
    date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    notes: "PR attempt".to_string(),
});

pub static WORKOUT_2: LazyLock<domain::Workout> = LazyLock::new(|| domain::Workout {
    id: 4.into(),
    user_id: USER.id,
    name: domain::Name::new("Pull Day").unwrap(),
    date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
    notes: String::new(),
});

pub static WORKOUT_3: LazyLock<domain::Workout> = LazyLock::new(|| domain::Workout {
    id: 5.into(),
    user_id: USER_2.id,
    name: domain::Name::new("Leg Day").unwrap(),
    date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
    notes: String::new(),
});

pub static EXERCISE: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: 6.into(),
    workout_id: WORKOUT.id,
    name: domain::Name::new("Bench Press").unwrap(),
    position: 0,
    notes: String::new(),
});

pub static EXERCISE_2: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: 7.into(),
    workout_id: WORKOUT.id,
    name: domain::Name::new("Squat").unwrap(),
    position: 1,
    notes: String::new(),
});

pub static EXERCISE_3: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: 8.into(),
    workout_id: WORKOUT_2.id,
    name: domain::Name::new("bench press").unwrap(),
    position: 0,
    notes: String::new(),
});

pub static EXERCISE_4: LazyLock<domain::Exercise> = LazyLock::new(|| domain::Exercise {
    id: 9.into(),
    workout_id: WORKOUT_3.id,
    name: domain::Name::new("Squat").unwrap(),
    position: 0,
    notes: String::new(),
});

pub static SET: LazyLock<domain::Set> = LazyLock::new(|| domain::Set {
    id: 10.into(),
    exercise_id: EXERCISE.id,
    position: 0,
    reps: Some(domain::Reps::new(10).unwrap()),
    weight: Some(domain::Weight::new(100.0).unwrap()),
    rest_time: Some(domain::RestTime::new(90).unwrap()),
    is_dropset: false,
});

pub static SET_2: LazyLock<domain::Set> = LazyLock::new(|| domain::Set {
    id: 11.into(),
    exercise_id: EXERCISE.id,
    position: 1,
    reps: Some(domain::Reps::new(8).unwrap()),
    weight: Some(domain::Weight::new(100.0).unwrap()),
    rest_time: None,
    is_dropset: true,
});

pub static SET_3: LazyLock<domain::Set> = LazyLock::new(|| domain::Set {
    id: 12.into(),
    exercise_id: EXERCISE_2.id,
    position: 0,
    reps: Some(domain::Reps::new(5).unwrap()),
    weight: Some(domain::Weight::new(120.0).unwrap()),
    rest_time: Some(domain::RestTime::new(120).unwrap()),
    is_dropset: false,
});

pub static SET_4: LazyLock<domain::Set> = LazyLock::new(|| domain::Set {
    id: 13.into(),
    exercise_id: EXERCISE_3.id,
    position: 0,
    reps: Some(domain::Reps::new(10).unwrap()),
    weight: Some(domain::Weight::new(105.0).unwrap()),
    rest_time: Some(domain::RestTime::new(80).unwrap()),
    is_dropset: false,
});

pub static SET_5: LazyLock<domain::Set> = LazyLock::new(|| domain::Set {
    id: 14.into(),
    exercise_id: EXERCISE_4.id,
    position: 0,
    reps: Some(domain::Reps::new(5).unwrap()),
    weight: Some(domain::Weight::new(140.0).unwrap()),
    rest_time: None,
    is_dropset: false,
});

pub static DROPSET_ENTRY: LazyLock<domain::DropsetEntry> =
    LazyLock::new(|| domain::DropsetEntry {
        id: 15.into(),
        set_id: SET_2.id,
        position: 0,
        reps: Some(domain::Reps::new(5).unwrap()),
        weight: Some(domain::Weight::new(80.0).unwrap()),
    });

pub static DROPSET_ENTRY_2: LazyLock<domain::DropsetEntry> =
    LazyLock::new(|| domain::DropsetEntry {
        id: 16.into(),
        set_id: SET_2.id,
        position: 1,
        reps: Some(domain::Reps::new(5).unwrap()),
        weight: Some(domain::Weight::new(60.0).unwrap()),
    });

pub const SNAPSHOT: &str = r#"{
  "users": [
    {"id": "00000000-0000-0000-0000-000000000001", "name": "Alice", "seq": 1},
    {"id": "00000000-0000-0000-0000-000000000002", "name": "Bob", "seq": 2}
  ],
  "workouts": [
    {"id": "00000000-0000-0000-0000-000000000003", "user_id": "00000000-0000-0000-0000-000000000001", "name": "Push Day", "date": "2024-05-01", "notes": "PR attempt", "seq": 3},
    {"id": "00000000-0000-0000-0000-000000000004", "user_id": "00000000-0000-0000-0000-000000000001", "name": "Pull Day", "date": "2024-05-03", "notes": "", "seq": 4},
    {"id": "00000000-0000-0000-0000-000000000005", "user_id": "00000000-0000-0000-0000-000000000002", "name": "Leg Day", "date": "2024-05-02", "notes": "", "seq": 5}
  ],
  "exercises": [
    {"id": "00000000-0000-0000-0000-000000000006", "workout_id": "00000000-0000-0000-0000-000000000003", "name": "Bench Press", "position": 0, "notes": "", "seq": 6},
    {"id": "00000000-0000-0000-0000-000000000007", "workout_id": "00000000-0000-0000-0000-000000000003", "name": "Squat", "position": 1, "notes": "", "seq": 7},
    {"id": "00000000-0000-0000-0000-000000000008", "workout_id": "00000000-0000-0000-0000-000000000004", "name": "bench press", "position": 0, "notes": "", "seq": 8},
    {"id": "00000000-0000-0000-0000-000000000009", "workout_id": "00000000-0000-0000-0000-000000000005", "name": "Squat", "position": 0, "notes": "", "seq": 9}
  ],
  "sets": [
    {"id": "00000000-0000-0000-0000-00000000000a", "exercise_id": "00000000-0000-0000-0000-000000000006", "position": 0, "reps": 10, "weight": 100.0, "rest_time": 90, "is_dropset": false, "seq": 10},
    {"id": "00000000-0000-0000-0000-00000000000b", "exercise_id": "00000000-0000-0000-0000-000000000006", "position": 1, "reps": 8, "weight": 100.0, "rest_time": null, "is_dropset": true, "seq": 11},
    {"id": "00000000-0000-0000-0000-00000000000c", "exercise_id": "00000000-0000-0000-0000-000000000007", "position": 0, "reps": 5, "weight": 120.0, "rest_time": 120, "is_dropset": false, "seq": 12},
    {"id": "00000000-0000-0000-0000-00000000000d", "exercise_id": "00000000-0000-0000-0000-000000000008", "position": 0, "reps": 10, "weight": 105.0, "rest_time": 80, "is_dropset": false, "seq": 13},
    {"id": "00000000-0000-0000-0000-00000000000e", "exercise_id": "00000000-0000-0000-0000-000000000009", "position": 0, "reps": 5, "weight": 140.0, "rest_time": null, "is_dropset": false, "seq": 14}
  ],
  "dropset_entries": [
    {"id": "00000000-0000-0000-0000-00000000000f", "set_id": "00000000-0000-0000-0000-00000000000b", "position": 0, "reps": 5, "weight": 80.0, "seq": 15},
    {"id": "00000000-0000-0000-0000-000000000010", "set_id": "00000000-0000-0000-0000-00000000000b", "position": 1, "reps": 5, "weight": 60.0, "seq": 16}
  ]
}"#;
