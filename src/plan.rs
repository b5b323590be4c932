//! The client data a diet plan is rendered from.
//!
//! Everything here is a plain snapshot: values are free text exactly as they were
//! entered, and only turned into display strings (units appended, blanks replaced,
//! text sanitized) when the table rows are built.

use crate::sanitize::{format_cell_text, sanitize_text};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Trainer credited in the footer when none is given
pub const DEFAULT_TRAINER: &str = "G-FORCE";

/// Shown for profile and macro values that were left blank
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown for meal slots that were left blank
pub const NOT_SPECIFIED: &str = "Not specified";

fn default_trainer() -> String {
    DEFAULT_TRAINER.to_string()
}

/// `None` when the value is empty or only whitespace
fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(value)
}

fn or_not_available(value: &str, format: impl FnOnce(&str) -> String) -> String {
    sanitize_text(&present(value).map(format).unwrap_or_else(|| NOT_AVAILABLE.into()))
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    #[serde(alias = "name", default)]
    pub client_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age: String,
    /// Body weight in kilograms
    #[serde(default)]
    pub weight: String,
    /// Height in centimetres
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub diet_type: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default = "default_trainer")]
    pub trainer_name: String,
}

impl Default for ClientProfile {
    fn default() -> Self {
        ClientProfile {
            client_name: String::new(),
            gender: String::new(),
            age: String::new(),
            weight: String::new(),
            height: String::new(),
            goal: String::new(),
            diet_type: String::new(),
            start_date: String::new(),
            trainer_name: default_trainer(),
        }
    }
}

impl ClientProfile {
    /// Label/value rows for the client information table
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", sanitize_text(&self.client_name)),
            ("Gender", or_not_available(&self.gender, str::to_string)),
            ("Age", sanitize_text(&self.age)),
            ("Weight", or_not_available(&self.weight, |w| format!("{w} kg"))),
            ("Height", or_not_available(&self.height, |h| format!("{h} cm"))),
            ("Goal", or_not_available(&self.goal, str::to_string)),
            ("Diet Type", or_not_available(&self.diet_type, str::to_string)),
            ("Start Date", or_not_available(&self.start_date, str::to_string)),
        ]
    }

    /// The trainer to credit, falling back to [DEFAULT_TRAINER] when blank
    pub fn trainer(&self) -> &str {
        present(&self.trainer_name).unwrap_or(DEFAULT_TRAINER)
    }
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionTargets {
    /// kcal per day
    pub calories: String,
    /// grams per day
    pub protein: String,
    /// grams per day
    pub carbs: String,
    /// grams per day
    pub fat: String,
    /// litres per day
    pub water_intake: String,
    pub supplements: String,
}

impl NutritionTargets {
    /// Label/value rows for the daily macros table. Supplements are rendered as their
    /// own paragraph and are not part of the table.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Calories", or_not_available(&self.calories, |v| format!("{v} kcal"))),
            ("Protein", or_not_available(&self.protein, |v| format!("{v}g"))),
            ("Carbs", or_not_available(&self.carbs, |v| format!("{v}g"))),
            ("Fat", or_not_available(&self.fat, |v| format!("{v}g"))),
            (
                "Water Intake",
                or_not_available(&self.water_intake, |v| format!("{v}L/day")),
            ),
        ]
    }
}

/// The nine fixed times of day a meal can be planned for
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MealSlot {
    EarlyMorning,
    PreWorkout,
    PostWorkout,
    Breakfast,
    MidMorning,
    Lunch,
    EveningSnack,
    Dinner,
    Bedtime,
}

impl MealSlot {
    /// Every slot, in the order it appears in the schedule
    pub const ALL: [MealSlot; 9] = [
        MealSlot::EarlyMorning,
        MealSlot::PreWorkout,
        MealSlot::PostWorkout,
        MealSlot::Breakfast,
        MealSlot::MidMorning,
        MealSlot::Lunch,
        MealSlot::EveningSnack,
        MealSlot::Dinner,
        MealSlot::Bedtime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MealSlot::EarlyMorning => "Early Morning",
            MealSlot::PreWorkout => "Pre-Workout",
            MealSlot::PostWorkout => "Post-Workout",
            MealSlot::Breakfast => "Breakfast",
            MealSlot::MidMorning => "Mid-Morning Snack",
            MealSlot::Lunch => "Lunch",
            MealSlot::EveningSnack => "Evening Snack",
            MealSlot::Dinner => "Dinner",
            MealSlot::Bedtime => "Bedtime",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MealSchedule {
    pub early_morning: String,
    pub pre_workout: String,
    pub post_workout: String,
    pub breakfast: String,
    pub mid_morning: String,
    pub lunch: String,
    pub evening_snack: String,
    pub dinner: String,
    pub bedtime: String,
}

impl MealSchedule {
    pub fn get(&self, slot: MealSlot) -> &str {
        match slot {
            MealSlot::EarlyMorning => &self.early_morning,
            MealSlot::PreWorkout => &self.pre_workout,
            MealSlot::PostWorkout => &self.post_workout,
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::MidMorning => &self.mid_morning,
            MealSlot::Lunch => &self.lunch,
            MealSlot::EveningSnack => &self.evening_snack,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Bedtime => &self.bedtime,
        }
    }

    /// Label/value rows for the meal schedule table, one per slot
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        MealSlot::ALL
            .iter()
            .map(|&slot| {
                let value = present(self.get(slot)).unwrap_or(NOT_SPECIFIED);
                (slot.label(), format_cell_text(value))
            })
            .collect()
    }
}

/// A field that must be filled in before a plan can be generated
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Age,
    Weight,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequiredField::Name => "Name",
            RequiredField::Age => "Age",
            RequiredField::Weight => "Weight",
        })
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("missing required fields: {}", .missing.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}

/// A complete snapshot of everything that goes into one generated document
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    #[serde(flatten)]
    pub profile: ClientProfile,
    #[serde(flatten)]
    pub nutrition: NutritionTargets,
    #[serde(default)]
    pub meals: MealSchedule,
    /// Free-text tips and guidelines
    #[serde(default)]
    pub notes: String,
}

impl DietPlan {
    /// Check that the fields needed to generate a plan are filled in
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<RequiredField> = [
            (RequiredField::Name, &self.profile.client_name),
            (RequiredField::Age, &self.profile.age),
            (RequiredField::Weight, &self.profile.weight),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    pub fn supplements(&self) -> Option<&str> {
        present(&self.nutrition.supplements)
    }

    pub fn notes(&self) -> Option<&str> {
        present(&self.notes)
    }
}
