use crate::scoring::{Category, GenderBlock, ScoreRange};
use crate::Instrument;

/// Metabolic Assessment Form: 134 symptom items scored 0–3 across 14 body
/// system categories, plus one sex-specific hormone block.
pub struct MetabolicAssessment;

impl Instrument for MetabolicAssessment {
    fn id(&self) -> &str {
        "metabolic"
    }

    fn name(&self) -> &str {
        "Metabolic Assessment"
    }

    fn categories(&self) -> &[Category] {
        static CATEGORIES: std::sync::LazyLock<Vec<Category>> = std::sync::LazyLock::new(|| {
            let defs = [
                ("Digestion - Colon", 1, 10),
                ("Upper Digestion - Stomach", 11, 16),
                ("Upper Digestion - HCL/Enzymes", 17, 23),
                ("Pancreas/Blood Sugar", 24, 31),
                ("Liver/Gallbladder", 32, 42),
                ("Hypoglycemia", 44, 52),
                ("Insulin Resistance", 53, 60),
                ("Adrenal - Hypo", 61, 68),
                ("Adrenal - Hyper", 69, 74),
                ("Thyroid - Hypo", 75, 86),
                ("Thyroid - Hyper", 87, 93),
                ("Endocrine - General", 94, 99),
                ("Cardiovascular", 100, 106),
                ("Immune/Inflammation", 107, 115),
            ];

            defs.iter()
                .enumerate()
                .map(|(i, (name, first, last))| Category {
                    id: format!("cat-{}", i + 1),
                    name: name.to_string(),
                    first_question: *first,
                    last_question: *last,
                })
                .collect()
        });
        &CATEGORIES
    }

    fn gender_blocks(&self) -> &[GenderBlock] {
        static BLOCKS: std::sync::LazyLock<Vec<GenderBlock>> = std::sync::LazyLock::new(|| {
            vec![
                GenderBlock {
                    sex: "male".to_string(),
                    category_name: "Male Hormones".to_string(),
                    questions: (116..=123).collect(),
                },
                GenderBlock {
                    sex: "female".to_string(),
                    category_name: "Female Hormones".to_string(),
                    questions: (124..=135).collect(),
                },
            ]
        });
        &BLOCKS
    }

    fn score_range(&self) -> ScoreRange {
        ScoreRange { min: 0, max: 3 }
    }

    fn question_text(&self, id: u16) -> Option<&str> {
        QUESTIONS
            .binary_search_by_key(&id, |(q, _)| *q)
            .ok()
            .map(|i| QUESTIONS[i].1)
    }
}

// Sorted by id.
static QUESTIONS: &[(u16, &str)] = &[
    // Digestion - Colon
    (1, "Feeling that bowels do not empty completely"),
    (2, "Lower abdominal pain relieved by passing stool or gas"),
    (3, "Alternating constipation and diarrhea"),
    (4, "Diarrhea"),
    (5, "Constipation"),
    (6, "Hard, dry, or small stool"),
    (7, "Coated tongue or 'fuzzy' debris on tongue"),
    (8, "Pass large amount of foul-smelling gas"),
    (9, "More than 3 bowel movements daily"),
    (10, "Use laxatives frequently"),
    // Upper Digestion - Stomach
    (11, "Excessive belching, burping, or bloating"),
    (12, "Gas immediately following a meal"),
    (13, "Offensive breath"),
    (14, "Difficult bowel movement"),
    (15, "Sense of fullness during and after meals"),
    (16, "Difficulty digesting fruits and vegetables; undigested food in stools"),
    // Upper Digestion - HCL/Enzymes
    (17, "Stomach pain, burning, or aching 1-4 hours after eating"),
    (18, "Use antacids"),
    (19, "Feel hungry an hour or two after eating"),
    (20, "Heartburn when lying down or bending forward"),
    (21, "Temporary relief by using antacids, food, milk, or carbonated beverages"),
    (22, "Digestive problems subside with rest and relaxation"),
    (23, "Heartburn due to spicy foods, chocolate, citrus, peppers, alcohol, and caffeine"),
    // Pancreas/Blood Sugar
    (24, "Roughage and fiber cause constipation"),
    (25, "Indigestion and fullness last 2-4 hours after eating"),
    (26, "Pain, tenderness, soreness on left side under rib cage"),
    (27, "Excessive passage of gas"),
    (28, "Nausea and/or vomiting"),
    (29, "Stool undigested, foul smelling, mucous-like, greasy, or poorly formed"),
    (30, "Frequent urination"),
    (31, "Increased thirst and appetite"),
    // Liver/Gallbladder
    (32, "Greasy or high-fat foods cause distress"),
    (33, "Lower bowel gas and/or bloating several hours after eating"),
    (34, "Bitter, metallic taste in mouth especially in the morning"),
    (35, "Burpy, fishy taste after consuming fish oils"),
    (36, "Difficulty losing weight"),
    (37, "Unexplained itchy skin"),
    (38, "Yellowish cast to eyes"),
    (39, "Stool color alternates from clay colored to normal brown"),
    (40, "Reddened skin, especially palms"),
    (41, "Dry or flaky skin and/or hair"),
    (42, "History of gallbladder attacks or stones"),
    // Hypoglycemia
    (44, "Crave sweets during the day"),
    (45, "Irritable if meals are missed"),
    (46, "Depend on coffee to keep going/get started"),
    (47, "Get light-headed if meals are missed"),
    (48, "Eating relieves fatigue"),
    (49, "Feel shaky, jittery, or have tremors"),
    (50, "Agitated, easily upset, nervous"),
    (51, "Poor memory/forgetful"),
    (52, "Blurred vision"),
    // Insulin Resistance
    (53, "Fatigue after meals"),
    (54, "Crave sweets during the day"),
    (55, "Eating sweets does not relieve craving for sugar"),
    (56, "Must have sweets after meals"),
    (57, "Waist girth equal to or larger than hip girth"),
    (58, "Frequent urination"),
    (59, "Increased appetite and thirst"),
    (60, "Difficulty losing weight"),
    // Adrenal - Hypo
    (61, "Cannot stay asleep"),
    (62, "Crave salt"),
    (63, "Slow starter in the morning"),
    (64, "Afternoon fatigue"),
    (65, "Dizziness when standing up quickly"),
    (66, "Afternoon headaches"),
    (67, "Headaches with exertion or stress"),
    (68, "Weak nails"),
    // Adrenal - Hyper
    (69, "Cannot fall asleep"),
    (70, "Perspire easily"),
    (71, "Under high amounts of stress"),
    (72, "Weight gain when under stress"),
    (73, "Wake up tired even after 6 or more hours of sleep"),
    (74, "Excessive perspiration or perspiration with little or no activity"),
    // Thyroid - Hypo
    (75, "Tired/sluggish"),
    (76, "Feel cold, cold hands/feet/all over"),
    (77, "Require excessive amounts of sleep to function properly"),
    (78, "Increase in weight even with low-calorie diet"),
    (79, "Gain weight easily"),
    (80, "Difficult, infrequent bowel movements"),
    (81, "Depression/lack of motivation"),
    (82, "Morning headaches that wear off as the day progresses"),
    (83, "Outer third of eyebrow thins"),
    (84, "Thinning of hair on scalp, face, or genitals"),
    (85, "Dryness of skin and/or scalp"),
    (86, "Mental sluggishness"),
    // Thyroid - Hyper
    (87, "Heart palpitations"),
    (88, "Inward trembling"),
    (89, "Increased pulse even at rest"),
    (90, "Nervous and emotional"),
    (91, "Insomnia"),
    (92, "Night sweats"),
    (93, "Difficulty gaining weight"),
    // Endocrine - General
    (94, "Diminished sex drive"),
    (95, "Increased facial hair (female)"),
    (96, "Decreased facial hair (male)"),
    (97, "Unexplained weight gain"),
    (98, "Extreme fatigue"),
    (99, "Changes in menstrual cycle (female)"),
    // Cardiovascular
    (100, "Aware of heavy and/or irregular breathing"),
    (101, "Discomfort at high altitudes"),
    (102, "Air hunger and/or frequent sighing"),
    (103, "Compelled to open windows in closed room"),
    (104, "Shortness of breath with moderate exertion"),
    (105, "Ankles swell, especially at end of day"),
    (106, "Muscle cramps with exercise"),
    // Immune/Inflammation
    (107, "Chronic pain or inflammation"),
    (108, "React to foods or chemicals"),
    (109, "Skin breakouts or skin conditions"),
    (110, "Joint stiffness or swelling"),
    (111, "Frequent colds or infections"),
    (112, "Allergies or hay fever"),
    (113, "Asthma or difficulty breathing"),
    (114, "Autoimmune condition diagnosed"),
    (115, "Family history of autoimmune conditions"),
    // Male Hormones
    (116, "Decreased libido"),
    (117, "Decreased erections"),
    (118, "Decreased mental sharpness"),
    (119, "Decreased stamina"),
    (120, "Decreased urine flow"),
    (121, "Difficulty urinating or dribbling"),
    (122, "Breast enlargement"),
    (123, "Prostate problems"),
    // Female Hormones
    (124, "PMS"),
    (125, "Mood swings during period"),
    (126, "Breast tenderness"),
    (127, "Bloating before period"),
    (128, "Heavy menstrual flow"),
    (129, "Painful periods"),
    (130, "Hot flashes"),
    (131, "Night sweats"),
    (132, "Vaginal dryness"),
    (133, "Decreased libido"),
    (134, "Irregular periods"),
    (135, "Depression/mood changes"),
];
