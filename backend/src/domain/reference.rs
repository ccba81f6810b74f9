//! Read-only reference data shown alongside the vitals: the patient
//! profile, the daily medication schedule, and recorded condition flags.

use serde::Serialize;
use utoipa::ToSchema;

/// Demographic and contact details for the monitored patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    /// Full name.
    #[schema(example = "John Doe")]
    pub name: String,
    /// Age in years.
    #[schema(example = 72)]
    pub age: u8,
    /// Gender as recorded.
    pub gender: String,
    /// ABO/Rh blood group.
    #[schema(example = "B+")]
    pub blood_group: String,
    /// Known allergies.
    pub allergies: String,
    /// Emergency contact name and phone number.
    pub emergency_contact: String,
    /// Home address.
    pub address: String,
    /// Responsible clinician.
    pub assigned_doctor: String,
}

/// One scheduled dose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicationDose {
    /// Medicine name.
    #[schema(example = "Aspirin")]
    pub medicine: String,
    /// Dose strength.
    #[schema(example = "75mg")]
    pub dosage: String,
    /// Time of day, as shown to the carer.
    #[schema(example = "8:00 AM")]
    pub time: String,
}

/// Whether a condition is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConditionFlag {
    /// Condition name.
    #[schema(example = "Diabetes")]
    pub condition: String,
    /// `true` when diagnosed.
    pub present: bool,
}

/// Everything served by the patient endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientReference {
    /// Patient profile.
    pub profile: PatientProfile,
    /// Medication schedule, in order of the day.
    pub medications: Vec<MedicationDose>,
    /// Condition flags.
    pub conditions: Vec<ConditionFlag>,
}

impl PatientReference {
    /// The dashboard's single monitored patient.
    pub fn standard() -> Self {
        let dose = |medicine: &str, dosage: &str, time: &str| MedicationDose {
            medicine: medicine.to_owned(),
            dosage: dosage.to_owned(),
            time: time.to_owned(),
        };
        let flag = |condition: &str, present: bool| ConditionFlag {
            condition: condition.to_owned(),
            present,
        };
        Self {
            profile: PatientProfile {
                name: "John Doe".to_owned(),
                age: 72,
                gender: "Male".to_owned(),
                blood_group: "B+".to_owned(),
                allergies: "None".to_owned(),
                emergency_contact: "Jane Doe (+1234567890)".to_owned(),
                address: "123 Elderly Lane, Healthville".to_owned(),
                assigned_doctor: "Dr. Smith, General Medicine".to_owned(),
            },
            medications: vec![
                dose("Aspirin", "75mg", "8:00 AM"),
                dose("Metformin", "500mg", "12:00 PM"),
                dose("Atorvastatin", "10mg", "8:00 PM"),
            ],
            conditions: vec![
                flag("Diabetes", true),
                flag("Hypertension", true),
                flag("Arthritis", false),
                flag("Asthma", false),
                flag("Heart Disease", true),
                flag("Others", false),
            ],
        }
    }
}
