//! Embedded health profile shapes (the `health_profile` section of
//! profile.json). Clinical codes ride along as optional strings; nothing
//! here interprets them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodedValue {
    pub code: String,
    pub display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthLocation {
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDemographics {
    pub dob: String,
    pub gender: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<CodedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<CodedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<HealthLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<HealthContact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCondition {
    pub icd10: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snomed: Option<String>,
    pub name: String,
    pub category: String,
    pub onset: String,
    pub status: String,
    pub severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMedication {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rxnorm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ndc: Option<String>,
    pub dose: String,
    pub frequency: String,
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescriber_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pharmacy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refills_remaining: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAllergy {
    pub allergen: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub reaction: String,
    pub severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snomed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthVitals {
    pub blood_pressure: BloodPressure,
    pub resting_hr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_hr_variance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spo2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthBodyComposition {
    pub body_fat_pct: f64,
    pub muscle_mass_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bone_mass_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visceral_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metabolic_age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmr_kcal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlucoseWindow {
    pub mean: f64,
    #[serde(default)]
    pub range: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_offset_min: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthGlucose {
    pub diabetes_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a1c: Option<f64>,
    pub uses_cgm: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fasting: Option<GlucoseWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_meal: Option<GlucoseWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyActivity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_target: Option<u64>,
    #[serde(default)]
    pub steps_typical: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_minutes_target: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_calories_target: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthFitness {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vo2_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_activity: Option<DailyActivity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSleep {
    pub target_hours: f64,
    #[serde(default)]
    pub typical_hours: Vec<f64>,
    pub quality: String,
    #[serde(default)]
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthNutrition {
    pub diet_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calorie_target: Option<u64>,
    #[serde(default)]
    pub restrictions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDevice {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    pub name: String,
    pub specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthProviders {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_care: Option<HealthProvider>,
    #[serde(default)]
    pub specialists: Vec<HealthProvider>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInsurance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthProfile {
    pub demographics: HealthDemographics,
    #[serde(default)]
    pub conditions: Vec<HealthCondition>,
    #[serde(default)]
    pub medications: Vec<HealthMedication>,
    #[serde(default)]
    pub allergies: Vec<HealthAllergy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<HealthVitals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_composition: Option<HealthBodyComposition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glucose: Option<HealthGlucose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness: Option<HealthFitness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep: Option<HealthSleep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<HealthNutrition>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub devices: BTreeMap<String, HealthDevice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<HealthProviders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<HealthInsurance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_profile_minimal_decode() {
        let raw = serde_json::json!({
            "demographics": {
                "dob": "1987-03-12",
                "gender": "female",
                "height_cm": 168.0,
                "weight_kg": 61.5
            },
            "conditions": [{
                "icd10": "E11.9",
                "name": "Type 2 diabetes",
                "category": "endocrine",
                "onset": "2019-06-01",
                "status": "active",
                "severity": "moderate"
            }],
            "devices": {
                "cgm": {"enabled": true, "brand": "Dexcom"}
            }
        });
        let profile: HealthProfile = serde_json::from_value(raw).unwrap();
        assert_eq!(profile.conditions.len(), 1);
        assert!(profile.devices.get("cgm").map(|d| d.enabled).unwrap_or(false));
        assert!(profile.vitals.is_none());
    }
}
