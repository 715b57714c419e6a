//! Chronic disease diagnoses and the clinical groups they roll up into.

use std::collections::BTreeSet;

use super::category::categorical;

categorical! {
    /// Broad clinical category a diagnosis belongs to.
    pub enum DiseaseGroup in "DiseaseGroup" {
        Respiratory => "RESPIRATORY",
        AtrialFibrillation => "ATRIAL_FIBR",
        Cardiovascular => "CARDIOVASCULAR",
        Osteoarthritis => "OSTEOARTHRITIS",
        Osteoporosis => "OSTEOPOROSIS",
        Rheumatoid => "RHEUMATOID",
        MentalHealth => "MENTAL_HEALTH",
        Cancer => "CANCER",
        Digestive => "DIGESTIVE",
        Hypertension => "HYPERTENSION",
        BloodFats => "BLOODFATS",
        ChronicKidney => "CHRONIC_KIDNEY",
        DiabetesType1 => "DIABETES_TYPE_1",
        DiabetesType2 => "DIABETES_TYPE_2",
        VenousThrombo => "VENOUS_THROMBO",
        /// Diagnoses not otherwise classified (e.g. epilepsy).
        Other => "OTHER",
    }
}

categorical! {
    /// A recorded chronic disease diagnosis.
    pub enum Disease in "Diseases" {
        Asthma => "ASTHMA",
        Copd => "COPD",
        ChronicKidney => "CHRONIC_KIDNEY",
        CoronaryHeart => "CORONARY_HEART",
        Stroke => "STROKE",
        TransientIschaemicAttack => "TRANSIENT_ISCHAEMIC_ATTACK",
        AtrialFibrillation => "ATRIAL_FIBR",
        CongestiveHeartFailure => "CONG_HEART_FAILURE",
        DiabetesType1 => "DIABETES_TYPE_1",
        DiabetesType2 => "DIABETES_TYPE_2",
        VenousThrombo => "VENOUS_THROMBO",
        Osteoarthritis => "OSTEOARTHRITIS",
        Depression => "DEPRESSION",
        Anxiety => "ANXIETY",
        Bipolar => "BIPOLAR",
        Schizophrenia => "SCHIZOPHRENIA",
        Cancer => "CANCER",
        Dementia => "DEMENTIA",
        Epilepsy => "EPILEPSY",
        Crohns => "CROHNS",
        UlcerativeColitis => "ULCER_COLITIS",
        Coeliac => "COELIAC",
        Steatorrhea => "STEATORRHEA",
        MalabsorptionSyndrome => "MALABSORP_SYNDR",
        ChronicLiver => "CHRONIC_LIVER",
        Pancreatitis => "PANCREATITIS",
        Hypertension => "HYPERTENSION",
        Osteoporosis => "OSTEOPOROSIS",
        Rheumatoid => "RHEUMATOID",
        Hyperlipidaemia => "HYPERLIPIDAEMIA",
        Hypercholesterolaemia => "HYPERCHOLESTEROLAEMIA",
        Hypertriglyceridaemia => "HYPERTRIGLYCERIDAEMIA",
        RheumaticHeart => "RHEUMATIC_HEART",
    }
}

/// Group of each disease, indexed by [`Disease::index`].
const DISEASE_GROUPS: [DiseaseGroup; Disease::COUNT] = [
    DiseaseGroup::Respiratory,        // ASTHMA
    DiseaseGroup::Respiratory,        // COPD
    DiseaseGroup::ChronicKidney,      // CHRONIC_KIDNEY
    DiseaseGroup::Cardiovascular,     // CORONARY_HEART
    DiseaseGroup::Cardiovascular,     // STROKE
    DiseaseGroup::Cardiovascular,     // TRANSIENT_ISCHAEMIC_ATTACK
    DiseaseGroup::AtrialFibrillation, // ATRIAL_FIBR
    DiseaseGroup::Cardiovascular,     // CONG_HEART_FAILURE
    DiseaseGroup::DiabetesType1,      // DIABETES_TYPE_1
    DiseaseGroup::DiabetesType2,      // DIABETES_TYPE_2
    DiseaseGroup::VenousThrombo,      // VENOUS_THROMBO
    DiseaseGroup::Osteoarthritis,     // OSTEOARTHRITIS
    DiseaseGroup::MentalHealth,       // DEPRESSION
    DiseaseGroup::MentalHealth,       // ANXIETY
    DiseaseGroup::MentalHealth,       // BIPOLAR
    DiseaseGroup::MentalHealth,       // SCHIZOPHRENIA
    DiseaseGroup::Cancer,             // CANCER
    DiseaseGroup::MentalHealth,       // DEMENTIA
    DiseaseGroup::Other,              // EPILEPSY
    DiseaseGroup::Digestive,          // CROHNS
    DiseaseGroup::Digestive,          // ULCER_COLITIS
    DiseaseGroup::Digestive,          // COELIAC
    DiseaseGroup::Digestive,          // STEATORRHEA
    DiseaseGroup::Digestive,          // MALABSORP_SYNDR
    DiseaseGroup::Digestive,          // CHRONIC_LIVER
    DiseaseGroup::Digestive,          // PANCREATITIS
    DiseaseGroup::Hypertension,       // HYPERTENSION
    DiseaseGroup::Osteoporosis,       // OSTEOPOROSIS
    DiseaseGroup::Rheumatoid,         // RHEUMATOID
    DiseaseGroup::BloodFats,          // HYPERLIPIDAEMIA
    DiseaseGroup::BloodFats,          // HYPERCHOLESTEROLAEMIA
    DiseaseGroup::BloodFats,          // HYPERTRIGLYCERIDAEMIA
    DiseaseGroup::Cardiovascular,     // RHEUMATIC_HEART
];

impl Disease {
    /// The clinical group this diagnosis belongs to.
    #[must_use]
    pub fn group(self) -> DiseaseGroup {
        DISEASE_GROUPS[self.index()]
    }
}

/// Collect the distinct groups covered by a set of diagnoses.
pub fn extract_disease_groups<'a, I>(diseases: I) -> BTreeSet<DiseaseGroup>
where
    I: IntoIterator<Item = &'a Disease>,
{
    diseases.into_iter().map(|d| d.group()).collect()
}
