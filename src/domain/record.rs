//! Patient risk factors consumed by the hospitalisation risk model.
//!
//! Every field carries a default so a record is always complete; absence of
//! information is itself a modelled category (`UNKNOWN`, `NOT_RECORDED`,
//! `NO_TEST_HISTORY`).

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::category::{categorical, RecordError};
use super::disease::{extract_disease_groups, Disease, DiseaseGroup};

categorical! {
    /// Aboriginal and Torres Strait Islander status.
    pub enum Ethnicity in "Ethnicity" {
        NonAtsi => "NON_ATSI",
        Atsi => "ATSI",
        Unknown => "UNKNOWN",
    }
}

categorical! {
    /// Body mass index band.
    pub enum BmiCategory in "BMICategory" {
        Bmi7To25 => "BMI_7_TO_25",
        Bmi25To30 => "BMI_25_TO_30",
        Bmi30To35 => "BMI_30_TO_35",
        Bmi35To40 => "BMI_35_TO_40",
        Bmi40To200 => "BMI_40_TO_200",
        NotRecorded => "NOT_RECORDED",
    }
}

categorical! {
    pub enum SmokingStatus in "SmokingStatus" {
        NonSmoker => "NON_SMOKER",
        ExSmoker => "EX_SMOKER",
        Smoker => "SMOKER",
        Unknown => "UNKNOWN",
    }
}

categorical! {
    pub enum AlcoholStatus in "AlcoholStatus" {
        NonDrinker => "NON_DRINKER",
        Drinker => "DRINKER",
        NotRecorded => "NOT_RECORDED",
    }
}

categorical! {
    /// Index of Relative Socio-economic Advantage and Disadvantage decile
    /// (1 = most disadvantaged, 10 = least).
    pub enum IrsadDecile in "IRSADDecile" {
        One => "ONE",
        Two => "TWO",
        Three => "THREE",
        Four => "FOUR",
        Five => "FIVE",
        Six => "SIX",
        Seven => "SEVEN",
        Eight => "EIGHT",
        Nine => "NINE",
        Ten => "TEN",
        Unknown => "UNKNOWN",
    }
}

categorical! {
    /// Medication classes currently prescribed.
    pub enum MedicationGroup in "MedicationGroups" {
        Statins => "STATINS",
        AntiCoagulants => "ANTI_COAGULANTS",
        AntiDepressants => "ANTI_DEPRESSANTS",
        AntiPsychotics => "ANTI_PSYCHOTICS",
        AntiInflammatory => "ANTI_INFLAMMATORY",
        Steroids => "STEROIDS",
    }
}

categorical! {
    /// Banded result of a pathology test.
    pub enum PathologyCategory in "PathologyCategory" {
        Low => "LOW",
        Med => "MED",
        High => "HIGH",
        NoTestHistory => "NO_TEST_HISTORY",
    }
}

categorical! {
    /// Pathology tests tracked by the model.
    pub enum PathologyTest in "Pathology" {
        Haemoglobin => "HaemoglobinCategory",
        Platelets => "PlateletsCategory",
        AlanineAminotransferase => "AlanineAminotransferaseCategory",
        GammaGt => "GammaGTCategory",
        HbA1c => "HbA1cCategory",
        Bilirubin => "BilirubinCategory",
        Cholesterol => "CholesterolCategory",
        Creatinine => "CreatinineCategory",
        Triglycerides => "TriglyceridesCategory",
        AlbuminCreatinineRatio => "AlbuminCreatinineRatioCategory",
        Ldl => "LDLCategory",
        Egfr => "EGFRCategory",
        BloodPressure => "BloodPressureCategory",
    }
}

impl IrsadDecile {
    /// Decile from its 1-based rank.
    ///
    /// # Errors
    /// Returns `RecordError::DecileOutOfRange` outside 1..=10.
    pub fn from_rank(rank: i64) -> Result<Self, RecordError> {
        match rank {
            1..=10 => Ok(Self::ALL[(rank - 1) as usize]),
            _ => Err(RecordError::DecileOutOfRange(rank)),
        }
    }
}

impl BmiCategory {
    /// Band a measured BMI value.
    ///
    /// Bands are closed below and open above, except the last which is
    /// closed at 200.
    ///
    /// # Errors
    /// Returns `RecordError::BmiOutOfRange` for values outside [7, 200] or NaN.
    pub fn from_bmi(bmi: f64) -> Result<Self, RecordError> {
        if !(7.0..=200.0).contains(&bmi) {
            return Err(RecordError::BmiOutOfRange(bmi));
        }
        Ok(match bmi {
            b if b < 25.0 => Self::Bmi7To25,
            b if b < 30.0 => Self::Bmi25To30,
            b if b < 35.0 => Self::Bmi30To35,
            b if b < 40.0 => Self::Bmi35To40,
            _ => Self::Bmi40To200,
        })
    }
}

/// Banded pathology results, one per [`PathologyTest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathologyResults {
    #[serde(rename = "HaemoglobinCategory")]
    haemoglobin: PathologyCategory,
    #[serde(rename = "PlateletsCategory")]
    platelets: PathologyCategory,
    #[serde(rename = "AlanineAminotransferaseCategory")]
    alanine_aminotransferase: PathologyCategory,
    #[serde(rename = "GammaGTCategory")]
    gamma_gt: PathologyCategory,
    #[serde(rename = "HbA1cCategory")]
    hba1c: PathologyCategory,
    #[serde(rename = "BilirubinCategory")]
    bilirubin: PathologyCategory,
    #[serde(rename = "CholesterolCategory")]
    cholesterol: PathologyCategory,
    #[serde(rename = "CreatinineCategory")]
    creatinine: PathologyCategory,
    #[serde(rename = "TriglyceridesCategory")]
    triglycerides: PathologyCategory,
    #[serde(rename = "AlbuminCreatinineRatioCategory")]
    albumin_creatinine_ratio: PathologyCategory,
    #[serde(rename = "LDLCategory")]
    ldl: PathologyCategory,
    #[serde(rename = "EGFRCategory")]
    egfr: PathologyCategory,
    #[serde(rename = "BloodPressureCategory")]
    blood_pressure: PathologyCategory,
}

impl PathologyResults {
    /// Every test set to the same category.
    #[must_use]
    pub fn uniform(category: PathologyCategory) -> Self {
        Self {
            haemoglobin: category,
            platelets: category,
            alanine_aminotransferase: category,
            gamma_gt: category,
            hba1c: category,
            bilirubin: category,
            cholesterol: category,
            creatinine: category,
            triglycerides: category,
            albumin_creatinine_ratio: category,
            ldl: category,
            egfr: category,
            blood_pressure: category,
        }
    }

    #[must_use]
    pub fn get(&self, test: PathologyTest) -> PathologyCategory {
        *self.slot(test)
    }

    pub fn set(&mut self, test: PathologyTest, category: PathologyCategory) {
        *self.slot_mut(test) = category;
    }

    /// `(test, category)` pairs in [`PathologyTest::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PathologyTest, PathologyCategory)> + '_ {
        PathologyTest::ALL.iter().map(move |&t| (t, self.get(t)))
    }

    fn slot(&self, test: PathologyTest) -> &PathologyCategory {
        match test {
            PathologyTest::Haemoglobin => &self.haemoglobin,
            PathologyTest::Platelets => &self.platelets,
            PathologyTest::AlanineAminotransferase => &self.alanine_aminotransferase,
            PathologyTest::GammaGt => &self.gamma_gt,
            PathologyTest::HbA1c => &self.hba1c,
            PathologyTest::Bilirubin => &self.bilirubin,
            PathologyTest::Cholesterol => &self.cholesterol,
            PathologyTest::Creatinine => &self.creatinine,
            PathologyTest::Triglycerides => &self.triglycerides,
            PathologyTest::AlbuminCreatinineRatio => &self.albumin_creatinine_ratio,
            PathologyTest::Ldl => &self.ldl,
            PathologyTest::Egfr => &self.egfr,
            PathologyTest::BloodPressure => &self.blood_pressure,
        }
    }

    fn slot_mut(&mut self, test: PathologyTest) -> &mut PathologyCategory {
        match test {
            PathologyTest::Haemoglobin => &mut self.haemoglobin,
            PathologyTest::Platelets => &mut self.platelets,
            PathologyTest::AlanineAminotransferase => &mut self.alanine_aminotransferase,
            PathologyTest::GammaGt => &mut self.gamma_gt,
            PathologyTest::HbA1c => &mut self.hba1c,
            PathologyTest::Bilirubin => &mut self.bilirubin,
            PathologyTest::Cholesterol => &mut self.cholesterol,
            PathologyTest::Creatinine => &mut self.creatinine,
            PathologyTest::Triglycerides => &mut self.triglycerides,
            PathologyTest::AlbuminCreatinineRatio => &mut self.albumin_creatinine_ratio,
            PathologyTest::Ldl => &mut self.ldl,
            PathologyTest::Egfr => &mut self.egfr,
            PathologyTest::BloodPressure => &mut self.blood_pressure,
        }
    }
}

impl Default for PathologyResults {
    fn default() -> Self {
        Self::uniform(PathologyCategory::NoTestHistory)
    }
}

/// Complete set of risk factors for one patient.
///
/// Serializes to the same JSON document shape accepted by
/// [`crate::adapters::json`], so a serialized record parses back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRiskRecord {
    #[serde(rename = "Age")]
    age: f64,
    #[serde(rename = "IsFemale")]
    is_female: bool,
    #[serde(rename = "Ethnicity")]
    ethnicity: Ethnicity,
    #[serde(rename = "BMICategory")]
    bmi_category: BmiCategory,
    #[serde(rename = "SmokingStatus")]
    smoking_status: SmokingStatus,
    #[serde(rename = "AlcoholStatus")]
    alcohol_status: AlcoholStatus,
    #[serde(rename = "IRSADDecile")]
    irsad_decile: IrsadDecile,
    #[serde(rename = "MedicationGroups")]
    medication_groups: BTreeSet<MedicationGroup>,
    #[serde(rename = "Diseases")]
    diseases: BTreeSet<Disease>,
    #[serde(rename = "Pathology")]
    pathology: PathologyResults,
}

impl Default for PatientRiskRecord {
    fn default() -> Self {
        Self {
            age: 0.0,
            is_female: false,
            ethnicity: Ethnicity::Unknown,
            bmi_category: BmiCategory::NotRecorded,
            smoking_status: SmokingStatus::Unknown,
            alcohol_status: AlcoholStatus::NotRecorded,
            irsad_decile: IrsadDecile::Unknown,
            medication_groups: BTreeSet::new(),
            diseases: BTreeSet::new(),
            pathology: PathologyResults::default(),
        }
    }
}

impl PatientRiskRecord {
    /// A record with every field at its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn age(&self) -> f64 {
        self.age
    }

    /// Set the age in years.
    ///
    /// # Errors
    /// Returns `RecordError::InvalidAge` for negative or non-finite values.
    pub fn set_age(&mut self, age: f64) -> Result<&mut Self, RecordError> {
        if !age.is_finite() || age < 0.0 {
            return Err(RecordError::InvalidAge(age));
        }
        // Normalise -0.0 so it renders and serializes as 0.
        self.age = age + 0.0;
        Ok(self)
    }

    #[must_use]
    pub fn is_female(&self) -> bool {
        self.is_female
    }

    pub fn set_is_female(&mut self, is_female: bool) -> &mut Self {
        self.is_female = is_female;
        self
    }

    #[must_use]
    pub fn ethnicity(&self) -> Ethnicity {
        self.ethnicity
    }

    pub fn set_ethnicity(&mut self, ethnicity: Ethnicity) -> &mut Self {
        self.ethnicity = ethnicity;
        self
    }

    #[must_use]
    pub fn bmi_category(&self) -> BmiCategory {
        self.bmi_category
    }

    pub fn set_bmi_category(&mut self, bmi_category: BmiCategory) -> &mut Self {
        self.bmi_category = bmi_category;
        self
    }

    #[must_use]
    pub fn smoking_status(&self) -> SmokingStatus {
        self.smoking_status
    }

    pub fn set_smoking_status(&mut self, smoking_status: SmokingStatus) -> &mut Self {
        self.smoking_status = smoking_status;
        self
    }

    #[must_use]
    pub fn alcohol_status(&self) -> AlcoholStatus {
        self.alcohol_status
    }

    pub fn set_alcohol_status(&mut self, alcohol_status: AlcoholStatus) -> &mut Self {
        self.alcohol_status = alcohol_status;
        self
    }

    #[must_use]
    pub fn irsad_decile(&self) -> IrsadDecile {
        self.irsad_decile
    }

    pub fn set_irsad_decile(&mut self, irsad_decile: IrsadDecile) -> &mut Self {
        self.irsad_decile = irsad_decile;
        self
    }

    #[must_use]
    pub fn medication_groups(&self) -> &BTreeSet<MedicationGroup> {
        &self.medication_groups
    }

    /// Replace the medication groups. Duplicates collapse.
    pub fn set_medication_groups<I>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = MedicationGroup>,
    {
        self.medication_groups = groups.into_iter().collect();
        self
    }

    #[must_use]
    pub fn diseases(&self) -> &BTreeSet<Disease> {
        &self.diseases
    }

    /// Replace the diagnoses. Duplicates collapse.
    pub fn set_diseases<I>(&mut self, diseases: I) -> &mut Self
    where
        I: IntoIterator<Item = Disease>,
    {
        self.diseases = diseases.into_iter().collect();
        self
    }

    /// Distinct disease groups covered by the recorded diagnoses.
    #[must_use]
    pub fn disease_groups(&self) -> BTreeSet<DiseaseGroup> {
        extract_disease_groups(&self.diseases)
    }

    #[must_use]
    pub fn pathology(&self, test: PathologyTest) -> PathologyCategory {
        self.pathology.get(test)
    }

    pub fn set_pathology(&mut self, test: PathologyTest, category: PathologyCategory) -> &mut Self {
        self.pathology.set(test, category);
        self
    }

    #[must_use]
    pub fn pathology_results(&self) -> &PathologyResults {
        &self.pathology
    }

    pub fn set_pathology_results(&mut self, results: PathologyResults) -> &mut Self {
        self.pathology = results;
        self
    }
}

fn write_set<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    items: &BTreeSet<T>,
) -> fmt::Result {
    let joined = items.iter().map(ToString::to_string).collect::<Vec<_>>();
    writeln!(f, "{label}: [{}]", joined.join(", "))
}

impl fmt::Display for PatientRiskRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Age: {}", self.age)?;
        writeln!(f, "IsFemale: {}", self.is_female)?;
        writeln!(f, "{}: {}", Ethnicity::FIELD, self.ethnicity)?;
        writeln!(f, "{}: {}", BmiCategory::FIELD, self.bmi_category)?;
        writeln!(f, "{}: {}", SmokingStatus::FIELD, self.smoking_status)?;
        writeln!(f, "{}: {}", AlcoholStatus::FIELD, self.alcohol_status)?;
        writeln!(f, "{}: {}", IrsadDecile::FIELD, self.irsad_decile)?;
        write_set(f, MedicationGroup::FIELD, &self.medication_groups)?;
        write_set(f, Disease::FIELD, &self.diseases)?;
        let mut tests = self.pathology.iter().peekable();
        while let Some((test, category)) = tests.next() {
            if tests.peek().is_some() {
                writeln!(f, "{test}: {category}")?;
            } else {
                write!(f, "{test}: {category}")?;
            }
        }
        Ok(())
    }
}
