//! Coefficients of the Health Care Homes hospitalisation risk model.
//!
//! Fitted logistic regression, fixed at release. Categorical tables are
//! indexed by variant discriminant and list variants in declaration order;
//! the reference category of each field carries 0.

use crate::domain::{
    AlcoholStatus, BmiCategory, DiseaseGroup, Ethnicity, IrsadDecile, MedicationGroup,
    PathologyCategory, PathologyTest, SmokingStatus,
};

/// Intercept
pub const INTERCEPT: f64 = -2.755148;

/// Age polynomial: linear, squared, cubed
pub const AGE: [f64; 3] = [-0.03795278, 0.0006159449, -0.000001047389];

pub const FEMALE: f64 = 0.2216384;

pub const ETHNICITY: [f64; Ethnicity::COUNT] = [
    0.0,         // NON_ATSI (reference)
    0.4033629,   // ATSI
    -0.06624966, // UNKNOWN
];

pub const BMI: [f64; BmiCategory::COUNT] = [
    0.0,        // BMI_7_TO_25 (reference)
    0.03294204, // BMI_25_TO_30
    0.1939825,  // BMI_30_TO_35
    0.2712273,  // BMI_35_TO_40
    0.4643618,  // BMI_40_TO_200
    0.139507,   // NOT_RECORDED
];

pub const SMOKING: [f64; SmokingStatus::COUNT] = [
    0.0,       // NON_SMOKER (reference)
    0.1969316, // EX_SMOKER
    0.4057213, // SMOKER
    0.199347,  // UNKNOWN
];

pub const ALCOHOL: [f64; AlcoholStatus::COUNT] = [
    0.0,        // NON_DRINKER (reference)
    -0.2853232, // DRINKER
    -0.2301394, // NOT_RECORDED
];

pub const IRSAD_DECILE: [f64; IrsadDecile::COUNT] = [
    -0.01238492, // ONE
    -0.07421796, // TWO
    0.004430832, // THREE
    -0.1857272,  // FOUR
    0.0,         // FIVE (reference)
    -0.2340966,  // SIX
    -0.2468854,  // SEVEN
    -0.2990624,  // EIGHT
    -0.1834029,  // NINE
    -0.4622169,  // TEN
    -0.030162,   // UNKNOWN
];

/// Added once per medication group present
pub const MEDICATION: [f64; MedicationGroup::COUNT] = [
    -0.01528814, // STATINS
    0.2886091,   // ANTI_COAGULANTS
    0.2025163,   // ANTI_DEPRESSANTS
    0.3923084,   // ANTI_PSYCHOTICS
    0.1301034,   // ANTI_INFLAMMATORY
    0.148835,    // STEROIDS
];

/// Disease count polynomial: linear, squared, cubed
pub const DISEASE_COUNT: [f64; 3] = [0.3369661, -0.03976625, 0.001930389];

/// Added once per disease group present
pub const DISEASE_GROUP: [f64; DiseaseGroup::COUNT] = [
    -0.07150371, // RESPIRATORY
    0.2234789,   // ATRIAL_FIBR
    0.4764327,   // CARDIOVASCULAR
    -0.2060183,  // OSTEOARTHRITIS
    0.05950344,  // OSTEOPOROSIS
    0.1149149,   // RHEUMATOID
    0.06869549,  // MENTAL_HEALTH
    0.06008254,  // CANCER
    0.1796635,   // DIGESTIVE
    -0.1591489,  // HYPERTENSION
    -0.3726723,  // BLOODFATS
    0.02682657,  // CHRONIC_KIDNEY
    0.5844975,   // DIABETES_TYPE_1
    0.1332004,   // DIABETES_TYPE_2
    0.3623621,   // VENOUS_THROMBO
    0.5157983,   // OTHER
];

/// Female x disease group interaction, added on top of [`DISEASE_GROUP`]
/// when the patient is female. `None` where the model has no interaction.
pub const FEMALE_DISEASE_GROUP: [Option<f64>; DiseaseGroup::COUNT] = [
    Some(0.05705658),     // RESPIRATORY
    None,                 // ATRIAL_FIBR
    Some(-0.2108839),     // CARDIOVASCULAR
    None,                 // OSTEOARTHRITIS
    Some(-0.2475655),     // OSTEOPOROSIS
    None,                 // RHEUMATOID
    Some(-0.06436747),    // MENTAL_HEALTH
    None,                 // CANCER
    None,                 // DIGESTIVE
    Some(-0.08909346),    // HYPERTENSION
    None,                 // BLOODFATS
    Some(-0.112216),      // CHRONIC_KIDNEY
    Some(0.2492323),      // DIABETES_TYPE_1
    Some(-0.0002784439),  // DIABETES_TYPE_2
    None,                 // VENOUS_THROMBO
    Some(-0.172162),      // OTHER
];

/// Pathology results by test, columns LOW (reference), MED, HIGH,
/// NO_TEST_HISTORY.
///
/// Bilirubin, creatinine and triglycerides were fitted on three bands, so MED
/// and HIGH share one coefficient. Platelets has no MED band; MED is scored
/// as the reference.
pub const PATHOLOGY: [[f64; PathologyCategory::COUNT]; PathologyTest::COUNT] = [
    [0.0, 0.1546069, 0.4416708, 0.04502215],    // HaemoglobinCategory
    [0.0, 0.0, 0.1398411, -0.01470966],         // PlateletsCategory
    [0.0, 0.05502668, -0.06195176, -0.2940664], // AlanineAminotransferaseCategory
    [0.0, 0.1261477, 0.2209109, 0.1979201],     // GammaGTCategory
    [0.0, 0.1720256, 0.1746667, -0.04617213],   // HbA1cCategory
    [0.0, 0.1803894, 0.1803894, 0.07843205],    // BilirubinCategory
    [0.0, -0.03635341, 0.04530537, 0.1749709],  // CholesterolCategory
    [0.0, 1.134946, 1.134946, -0.1704331],      // CreatinineCategory
    [0.0, 0.1234874, 0.1234874, -0.0963018],    // TriglyceridesCategory
    [0.0, 0.1151562, 0.304275, 0.1059512],      // AlbuminCreatinineRatioCategory
    [0.0, -0.05395995, -0.05859249, 0.1556545], // LDLCategory
    [0.0, 0.09504744, 0.08914862, 0.04597902],  // EGFRCategory
    [0.0, 0.1839175, 0.2946162, 0.01121054],    // BloodPressureCategory
];
