//! Score engine: linear predictor assembly and logistic transform.
//!
//! The linear predictor is summed in exact decimal arithmetic from the
//! compiled-in coefficient table; only the final division is rounded (see
//! [`logistic`]). The engine holds no state and never fails on a record
//! that was constructed successfully.

pub mod coefficients;
pub mod logistic;

use std::sync::OnceLock;

use bigdecimal::BigDecimal;

use crate::domain::{
    AlcoholStatus, Assessment, BmiCategory, DiseaseGroup, Ethnicity, IrsadDecile,
    MedicationGroup, PathologyCategory, PathologyTest, PatientRiskRecord, SmokingStatus,
};
use crate::ports::RiskModel;
use logistic::decimal;

/// Coefficient table converted to decimals once per process.
struct DecimalCoefficients {
    intercept: BigDecimal,
    age: [BigDecimal; 3],
    female: BigDecimal,
    ethnicity: [BigDecimal; Ethnicity::COUNT],
    bmi: [BigDecimal; BmiCategory::COUNT],
    smoking: [BigDecimal; SmokingStatus::COUNT],
    alcohol: [BigDecimal; AlcoholStatus::COUNT],
    irsad_decile: [BigDecimal; IrsadDecile::COUNT],
    medication: [BigDecimal; MedicationGroup::COUNT],
    disease_count: [BigDecimal; 3],
    disease_group: [BigDecimal; DiseaseGroup::COUNT],
    female_disease_group: [Option<BigDecimal>; DiseaseGroup::COUNT],
    pathology: [[BigDecimal; PathologyCategory::COUNT]; PathologyTest::COUNT],
}

static COEFFICIENTS: OnceLock<DecimalCoefficients> = OnceLock::new();

fn table() -> &'static DecimalCoefficients {
    use self::coefficients as c;

    COEFFICIENTS.get_or_init(|| DecimalCoefficients {
        intercept: decimal(c::INTERCEPT),
        age: c::AGE.map(decimal),
        female: decimal(c::FEMALE),
        ethnicity: c::ETHNICITY.map(decimal),
        bmi: c::BMI.map(decimal),
        smoking: c::SMOKING.map(decimal),
        alcohol: c::ALCOHOL.map(decimal),
        irsad_decile: c::IRSAD_DECILE.map(decimal),
        medication: c::MEDICATION.map(decimal),
        disease_count: c::DISEASE_COUNT.map(decimal),
        disease_group: c::DISEASE_GROUP.map(decimal),
        female_disease_group: c::FEMALE_DISEASE_GROUP.map(|v| v.map(decimal)),
        pathology: c::PATHOLOGY.map(|row| row.map(decimal)),
    })
}

/// `b1*x + b2*x^2 + b3*x^3`
fn cubic(coefficients: &[BigDecimal; 3], x: &BigDecimal) -> BigDecimal {
    let squared = x * x;
    let cubed = &squared * x;
    x * &coefficients[0] + &squared * &coefficients[1] + &cubed * &coefficients[2]
}

/// The Health Care Homes hospitalisation risk model.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine;

impl ScoreEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Linear predictor (log-odds of hospitalisation) for a record.
    #[must_use]
    pub fn linear_predictor(&self, record: &PatientRiskRecord) -> BigDecimal {
        let c = table();
        let mut eta = c.intercept.clone();

        eta += cubic(&c.age, &decimal(record.age()));

        if record.is_female() {
            eta += &c.female;
        }

        eta += &c.ethnicity[record.ethnicity().index()];
        eta += &c.bmi[record.bmi_category().index()];
        eta += &c.smoking[record.smoking_status().index()];
        eta += &c.alcohol[record.alcohol_status().index()];
        eta += &c.irsad_decile[record.irsad_decile().index()];

        for group in record.medication_groups() {
            eta += &c.medication[group.index()];
        }

        let disease_count = BigDecimal::from(record.diseases().len() as u64);
        eta += cubic(&c.disease_count, &disease_count);

        let groups = record.disease_groups();
        for group in &groups {
            eta += &c.disease_group[group.index()];
        }

        for (test, category) in record.pathology_results().iter() {
            eta += &c.pathology[test.index()][category.index()];
        }

        if record.is_female() {
            for group in &groups {
                if let Some(interaction) = &c.female_disease_group[group.index()] {
                    eta += interaction;
                }
            }
        }

        eta
    }

    /// Probability of hospitalisation, rounded half-up to 8 decimal places.
    #[must_use]
    pub fn compute_probability(&self, record: &PatientRiskRecord) -> f64 {
        logistic::probability(&self.linear_predictor(record))
    }
}

impl RiskModel for ScoreEngine {
    fn name(&self) -> &'static str {
        "hch-risk-stratification"
    }

    fn assess(&self, record: &PatientRiskRecord) -> Assessment {
        let eta = self.linear_predictor(record);
        Assessment::new(logistic::probability(&eta), logistic::to_f64(&eta))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::domain::{Disease, PathologyResults};

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    /// Every field at its zero-contribution category.
    fn reference_record() -> PatientRiskRecord {
        let mut record = PatientRiskRecord::new();
        record
            .set_ethnicity(Ethnicity::NonAtsi)
            .set_bmi_category(BmiCategory::Bmi7To25)
            .set_smoking_status(SmokingStatus::NonSmoker)
            .set_alcohol_status(AlcoholStatus::NonDrinker)
            .set_irsad_decile(IrsadDecile::Five)
            .set_pathology_results(PathologyResults::uniform(PathologyCategory::Low));
        record
    }

    fn delta(record: &PatientRiskRecord) -> BigDecimal {
        ScoreEngine.linear_predictor(record) - decimal(coefficients::INTERCEPT)
    }

    #[test]
    fn test_reference_record_is_intercept() {
        let engine = ScoreEngine::new();
        let record = reference_record();
        assert_eq!(engine.linear_predictor(&record), dec("-2.755148"));
        assert!((engine.compute_probability(&record) - 0.05979657).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_record() {
        let engine = ScoreEngine::new();
        let record = PatientRiskRecord::new();
        assert_eq!(engine.linear_predictor(&record), dec("-2.54938769"));
        assert!((engine.compute_probability(&record) - 0.07246763).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_categorical_changes_add_their_coefficient() {
        let mut record = reference_record();
        record.set_ethnicity(Ethnicity::Atsi);
        assert_eq!(delta(&record), dec("0.4033629"));

        let mut record = reference_record();
        record.set_bmi_category(BmiCategory::Bmi40To200);
        assert_eq!(delta(&record), dec("0.4643618"));

        let mut record = reference_record();
        record.set_irsad_decile(IrsadDecile::Ten);
        assert_eq!(delta(&record), dec("-0.4622169"));

        let mut record = reference_record();
        record.set_alcohol_status(AlcoholStatus::Drinker);
        assert_eq!(delta(&record), dec("-0.2853232"));
    }

    #[test]
    fn test_every_variant_contributes_its_table_entry() {
        macro_rules! check {
            ($ty:ty, $table:expr, $set:ident) => {
                for variant in <$ty>::ALL {
                    let mut record = reference_record();
                    record.$set(*variant);
                    assert_eq!(delta(&record), decimal($table[variant.index()]), "{variant}");
                }
            };
        }
        check!(Ethnicity, coefficients::ETHNICITY, set_ethnicity);
        check!(BmiCategory, coefficients::BMI, set_bmi_category);
        check!(SmokingStatus, coefficients::SMOKING, set_smoking_status);
        check!(AlcoholStatus, coefficients::ALCOHOL, set_alcohol_status);
        check!(IrsadDecile, coefficients::IRSAD_DECILE, set_irsad_decile);
    }

    #[test]
    fn test_every_pathology_cell_contributes_its_table_entry() {
        for test in PathologyTest::ALL {
            for category in PathologyCategory::ALL {
                let mut record = reference_record();
                record.set_pathology(*test, *category);
                assert_eq!(
                    delta(&record),
                    decimal(coefficients::PATHOLOGY[test.index()][category.index()]),
                    "{test} {category}"
                );
            }
        }
    }

    #[test]
    fn test_reference_variants_have_zero_coefficient() {
        assert_eq!(coefficients::ETHNICITY[Ethnicity::NonAtsi.index()], 0.0);
        assert_eq!(coefficients::BMI[BmiCategory::Bmi7To25.index()], 0.0);
        assert_eq!(coefficients::SMOKING[SmokingStatus::NonSmoker.index()], 0.0);
        assert_eq!(coefficients::ALCOHOL[AlcoholStatus::NonDrinker.index()], 0.0);
        assert_eq!(coefficients::IRSAD_DECILE[IrsadDecile::Five.index()], 0.0);
        for row in coefficients::PATHOLOGY {
            assert_eq!(row[PathologyCategory::Low.index()], 0.0);
        }
    }

    #[test]
    fn test_platelets_med_is_reference() {
        let mut record = reference_record();
        record.set_pathology(PathologyTest::Platelets, PathologyCategory::Med);
        assert_eq!(delta(&record), dec("0"));
    }

    #[test]
    fn test_three_band_tests_share_med_and_high() {
        for test in [
            PathologyTest::Bilirubin,
            PathologyTest::Creatinine,
            PathologyTest::Triglycerides,
        ] {
            let row = coefficients::PATHOLOGY[test.index()];
            assert_eq!(row[PathologyCategory::Med.index()], row[PathologyCategory::High.index()]);
        }
    }

    #[test]
    fn test_female_interactions_cover_nine_groups() {
        let groups: Vec<_> = DiseaseGroup::ALL
            .iter()
            .filter(|g| coefficients::FEMALE_DISEASE_GROUP[g.index()].is_some())
            .copied()
            .collect();
        assert_eq!(
            groups,
            vec![
                DiseaseGroup::Respiratory,
                DiseaseGroup::Cardiovascular,
                DiseaseGroup::Osteoporosis,
                DiseaseGroup::MentalHealth,
                DiseaseGroup::Hypertension,
                DiseaseGroup::ChronicKidney,
                DiseaseGroup::DiabetesType1,
                DiseaseGroup::DiabetesType2,
                DiseaseGroup::Other,
            ]
        );
    }

    #[test]
    fn test_every_disease_group_contributes_its_own_coefficient() {
        use DiseaseGroup as G;

        let expected = [
            (G::Respiratory, "-0.07150371", Some("0.05705658")),
            (G::AtrialFibrillation, "0.2234789", None),
            (G::Cardiovascular, "0.4764327", Some("-0.2108839")),
            (G::Osteoarthritis, "-0.2060183", None),
            (G::Osteoporosis, "0.05950344", Some("-0.2475655")),
            (G::Rheumatoid, "0.1149149", None),
            (G::MentalHealth, "0.06869549", Some("-0.06436747")),
            (G::Cancer, "0.06008254", None),
            (G::Digestive, "0.1796635", None),
            (G::Hypertension, "-0.1591489", Some("-0.08909346")),
            (G::BloodFats, "-0.3726723", None),
            (G::ChronicKidney, "0.02682657", Some("-0.112216")),
            (G::DiabetesType1, "0.5844975", Some("0.2492323")),
            (G::DiabetesType2, "0.1332004", Some("-0.0002784439")),
            (G::VenousThrombo, "0.3623621", None),
            (G::Other, "0.5157983", Some("-0.172162")),
        ];
        assert_eq!(expected.len(), DiseaseGroup::COUNT);

        let one_disease = dec("0.3369661") + dec("-0.03976625") + dec("0.001930389");
        for (group, main, interaction) in expected {
            let disease = Disease::ALL
                .iter()
                .copied()
                .find(|d| d.group() == group)
                .expect("every group has a disease");
            let main_effect = &one_disease + dec(main);

            let mut male = reference_record();
            male.set_diseases([disease]);
            assert_eq!(delta(&male), main_effect, "{group}");

            let mut female = male.clone();
            female.set_is_female(true);
            assert_eq!(
                delta(&female),
                main_effect + dec("0.2216384") + dec(interaction.unwrap_or("0")),
                "female {group}"
            );
        }
    }

    #[test]
    fn test_female_interaction_only_when_both_present() {
        let mut female = reference_record();
        female.set_is_female(true);
        assert_eq!(delta(&female), dec("0.2216384"));

        let mut asthma = reference_record();
        asthma.set_diseases([Disease::Asthma]);
        let one_disease = dec("0.3369661") + dec("-0.03976625") + dec("0.001930389");
        assert_eq!(delta(&asthma), &one_disease + dec("-0.07150371"));

        let mut both = asthma.clone();
        both.set_is_female(true);
        assert_eq!(
            delta(&both),
            one_disease + dec("-0.07150371") + dec("0.2216384") + dec("0.05705658")
        );
        assert!((ScoreEngine.compute_probability(&both) - 0.09545074).abs() < f64::EPSILON);
    }

    #[test]
    fn test_group_without_interaction_ignores_sex() {
        let mut male = reference_record();
        male.set_diseases([Disease::Cancer]);
        let mut female = male.clone();
        female.set_is_female(true);
        assert_eq!(delta(&female) - delta(&male), dec("0.2216384"));
    }

    #[test]
    fn test_group_counted_once_per_record() {
        let mut one = reference_record();
        one.set_diseases([Disease::CoronaryHeart]);
        let mut two = reference_record();
        two.set_diseases([Disease::CoronaryHeart, Disease::Stroke]);

        // The second cardiovascular disease only moves the count polynomial.
        let count_step = dec("0.3369661") * dec("1")
            + dec("-0.03976625") * dec("3")
            + dec("0.001930389") * dec("7");
        assert_eq!(delta(&two) - delta(&one), count_step);
    }

    #[test]
    fn test_medications_are_a_set_sum() {
        let mut record = reference_record();
        record.set_medication_groups(MedicationGroup::ALL.iter().copied());
        let expected = coefficients::MEDICATION
            .iter()
            .map(|c| decimal(*c))
            .fold(dec("0"), |acc, c| acc + c);
        assert_eq!(delta(&record), expected);
    }

    #[test]
    fn test_age_polynomial_closed_form() {
        let mut record = reference_record();
        record.set_age(70.0).expect("valid age");
        let expected = dec("70") * dec("-0.03795278")
            + dec("4900") * dec("0.0006159449")
            + dec("343000") * dec("-0.000001047389");
        assert_eq!(delta(&record), expected);
        assert_eq!(ScoreEngine.linear_predictor(&record), dec("-2.752967017"));
        assert!((ScoreEngine.compute_probability(&record) - 0.0599193).abs() < f64::EPSILON);
    }

    #[test]
    fn test_oldest_modelled_age() {
        let mut record = reference_record();
        record.set_age(130.0).expect("valid age");
        assert_eq!(ScoreEngine.linear_predictor(&record), dec("0.419345777"));
        assert!((ScoreEngine.compute_probability(&record) - 0.60332669).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fractional_age_is_exact() {
        let mut record = reference_record();
        record.set_age(52.5).expect("valid age");
        let expected = dec("52.5") * dec("-0.03795278")
            + dec("2756.25") * dec("0.0006159449")
            + dec("144703.125") * dec("-0.000001047389");
        assert_eq!(delta(&record), expected);
    }

    #[test]
    fn test_assess_reports_both_scales() {
        let assessment = ScoreEngine.assess(&PatientRiskRecord::new());
        assert!((assessment.probability - 0.07246763).abs() < f64::EPSILON);
        assert!((assessment.linear_predictor - -2.54938769).abs() < 1e-12);
        assert_eq!(ScoreEngine.name(), "hch-risk-stratification");
    }
}
