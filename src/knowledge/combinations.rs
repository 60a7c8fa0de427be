//! Built-in symptom combinations.
//!
//! Combinations may overlap; the matcher resolves overlaps by score and,
//! on equal score, by the order declared here.

use crate::models::{DiagnosisBundle, SymptomCombination};

fn combination(
    symptoms: &[&str],
    diagnosis: &str,
    recommendations: &[&str],
    avoid: &[&str],
    follow_up: &str,
) -> SymptomCombination {
    SymptomCombination {
        symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        bundle: DiagnosisBundle::new(diagnosis, recommendations, avoid, follow_up),
    }
}

/// All built-in combinations, in declaration order.
pub fn builtin_combinations() -> Vec<SymptomCombination> {
    vec![
        combination(
            &["fever", "cough", "sore throat", "body aches"],
            "Common Flu",
            &[
                "Taking ibuprofen can help reduce fever and pain",
                "Rest and staying hydrated are essential for recovery",
            ],
            &[
                "Having cold food and drinks",
                "Going to work/school and spreading the infection",
            ],
            "If the symptoms persist beyond a week, consult a doctor",
        ),
        combination(
            &["fever", "headache", "sore throat", "body aches"],
            "Common Flu",
            &[
                "Taking ibuprofen can help reduce fever and pain",
                "Getting plenty of rest helps your immune system fight the infection",
            ],
            &[
                "Having cold food and drinks",
                "Strenuous activity until recovery",
            ],
            "If the symptoms persist, consult a doctor",
        ),
        combination(
            &["runny nose", "sneezing", "congestion", "cough"],
            "Common Cold",
            &[
                "Using over-the-counter decongestants can relieve congestion",
                "Drinking warm fluids to soothe the throat and thin mucus",
            ],
            &[
                "Alcohol and smoking which can worsen symptoms",
                "Sharing personal items like towels or utensils",
            ],
            "If symptoms worsen after a week or include high fever, see a doctor",
        ),
        combination(
            &["headache", "runny nose", "sneezing", "watery eyes"],
            "Seasonal Allergies",
            &[
                "Over-the-counter antihistamines can provide relief",
                "Nasal irrigation with saline solution may help clear allergens",
            ],
            &[
                "Known allergens such as pollen or dust",
                "Outdoor activities during high pollen count",
            ],
            "If symptoms persist beyond a few weeks, consider allergy testing",
        ),
        combination(
            &["wheezing", "shortness of breath", "chest tightness", "coughing"],
            "Possible Asthma",
            &[
                "Avoid known triggers like allergens or exercise if they worsen symptoms",
                "Use a rescue inhaler if prescribed by your doctor",
            ],
            &[
                "Smoking and exposure to secondhand smoke",
                "Environmental irritants such as strong perfumes or cleaning chemicals",
            ],
            "This condition requires proper medical evaluation and management plan",
        ),
        combination(
            &["cough", "fever", "shortness of breath", "chest pain"],
            "Possible Pneumonia",
            &[
                "Seek medical attention promptly - this could be serious",
                "Rest and stay hydrated in the meantime",
            ],
            &[
                "Delay in seeking medical care",
                "Over-exertion which can strain breathing",
            ],
            "This condition requires urgent professional medical evaluation",
        ),
        combination(
            &["sudden shortness of breath", "chest pain", "rapid breathing", "blue lips"],
            "Possible Pulmonary Embolism - MEDICAL EMERGENCY",
            &[
                "Seek emergency medical care immediately - call 911/ambulance",
                "Remain calm and try to maintain steady breathing if possible",
            ],
            &[
                "Any delay in seeking emergency care",
                "Physical exertion of any kind",
            ],
            "This is a life-threatening emergency requiring immediate hospital care",
        ),
        combination(
            &["sore throat", "fever", "difficulty swallowing", "swollen glands"],
            "Possible Strep Throat",
            &[
                "Gargling with salt water can temporarily relieve pain",
                "Medical evaluation for possible antibiotic treatment",
            ],
            &[
                "Acidic or spicy foods that can irritate the throat",
                "Sharing utensils or drinks with others",
            ],
            "See a doctor for proper diagnosis and treatment",
        ),
        combination(
            &["ear pain", "hearing difficulty", "fever", "ear discharge"],
            "Possible Ear Infection",
            &[
                "Over-the-counter pain relievers for discomfort",
                "Warm compress on the affected ear",
            ],
            &[
                "Inserting anything into the ear canal",
                "Swimming or submerging the head underwater",
            ],
            "See a doctor if symptoms persist more than 2-3 days",
        ),
        combination(
            &["abdominal pain", "diarrhea", "nausea", "vomiting"],
            "Gastroenteritis (Stomach Flu)",
            &[
                "Stay hydrated with clear fluids sipped slowly",
                "Try the BRAT diet (bananas, rice, applesauce, toast) when able to eat",
            ],
            &[
                "Dairy products, greasy or spicy foods",
                "Caffeine and alcohol which can worsen dehydration",
            ],
            "If symptoms last more than 3 days or include bloody stool, see a doctor",
        ),
        combination(
            &["right lower abdominal pain", "nausea", "fever", "loss of appetite"],
            "Possible Appendicitis - REQUIRES MEDICAL ATTENTION",
            &[
                "Seek immediate medical evaluation",
                "Do not take pain medications before medical evaluation",
            ],
            &[
                "Taking laxatives or using heating pads on the abdomen",
                "Eating or drinking until evaluated by a doctor",
            ],
            "This condition may require emergency surgery",
        ),
        combination(
            &["heartburn", "chest pain", "regurgitation", "bitter taste in mouth"],
            "Acid Reflux/GERD",
            &[
                "Over-the-counter antacids can provide temporary relief",
                "Eat smaller meals and avoid lying down for 3 hours after eating",
            ],
            &[
                "Spicy, fatty, or acidic foods",
                "Alcohol, caffeine, and smoking",
            ],
            "If symptoms persist more than 2 weeks, consult a doctor",
        ),
        combination(
            &["chest pain", "shortness of breath", "pain radiating to arm or jaw", "sweating"],
            "Possible Heart Attack - MEDICAL EMERGENCY",
            &[
                "Call 911 or emergency services immediately",
                "Take aspirin if available and not allergic",
            ],
            &[
                "Delay in seeking emergency care",
                "Physical exertion of any kind",
            ],
            "This is a life-threatening emergency requiring immediate hospital care",
        ),
        combination(
            &["sudden weakness", "facial drooping", "difficulty speaking", "confusion"],
            "Possible Stroke - MEDICAL EMERGENCY",
            &[
                "Call 911 or emergency services immediately",
                "Note the time symptoms began",
            ],
            &[
                "Delay in seeking emergency care",
                "Taking medications before medical evaluation",
            ],
            "This is a time-sensitive emergency requiring immediate hospital care",
        ),
        combination(
            &["severe headache", "sensitivity to light", "nausea", "visual disturbances"],
            "Migraine",
            &[
                "Rest in a dark, quiet room",
                "Over-the-counter pain relievers may help if taken early",
            ],
            &[
                "Bright lights and loud noises",
                "Known trigger foods like aged cheese, alcohol, or chocolate",
            ],
            "If migraines are frequent or debilitating, consult a neurologist",
        ),
        combination(
            &["sudden severe headache", "stiff neck", "fever", "confusion"],
            "Possible Meningitis - MEDICAL EMERGENCY",
            &[
                "Seek emergency medical care immediately",
                "This is a potentially life-threatening condition",
            ],
            &[
                "Any delay in seeking emergency care",
                "Taking medications that might mask symptoms",
            ],
            "This requires immediate hospital evaluation and treatment",
        ),
        combination(
            &["joint pain", "joint swelling", "stiffness", "limited range of motion"],
            "Possible Arthritis",
            &[
                "Over-the-counter anti-inflammatory medications can reduce pain and swelling",
                "Applying ice for 20 minutes several times daily can help reduce inflammation",
            ],
            &[
                "Activities that cause pain or put stress on affected joints",
                "Remaining inactive for long periods which can increase stiffness",
            ],
            "A doctor can determine the type of arthritis and recommend treatment",
        ),
        combination(
            &["lower back pain", "difficulty moving", "muscle spasms", "pain radiating to legs"],
            "Lower Back Strain/Sprain",
            &[
                "Rest the back for 1-2 days, avoiding activities that cause pain",
                "Over-the-counter pain relievers and ice packs can reduce pain and swelling",
            ],
            &[
                "Heavy lifting or twisting movements",
                "Prolonged bed rest which can weaken muscles",
            ],
            "If pain is severe, persists more than a week, or includes numbness, see a doctor",
        ),
        combination(
            &["rash", "itching", "redness", "skin swelling"],
            "Possible Allergic Reaction",
            &[
                "Over-the-counter antihistamines can reduce itching and swelling",
                "Cool compresses can soothe irritated skin",
            ],
            &[
                "Scratching which can worsen symptoms and lead to infection",
                "Known allergens that may have triggered the reaction",
            ],
            "If symptoms include difficulty breathing or swallowing, seek emergency care",
        ),
        combination(
            &["painful red rash", "blisters", "tingling", "burning"],
            "Possible Shingles",
            &[
                "See a doctor promptly - antiviral medication works best if started early",
                "Over-the-counter pain relievers can help manage pain",
            ],
            &[
                "Touching or scratching the rash",
                "Contact with pregnant women or those with weakened immune systems",
            ],
            "Medical evaluation is important for proper diagnosis and treatment",
        ),
        combination(
            &["painful urination", "frequent urination", "urgency", "lower abdominal pain"],
            "Possible Urinary Tract Infection",
            &[
                "Drink plenty of water to help flush bacteria",
                "See a doctor for antibiotics which are typically needed",
            ],
            &[
                "Caffeine, alcohol, and spicy foods which can irritate the bladder",
                "Delaying urination when you feel the need to go",
            ],
            "Complete the full course of antibiotics if prescribed",
        ),
        combination(
            &["flank pain", "fever", "painful urination", "cloudy urine"],
            "Possible Kidney Infection - REQUIRES PROMPT ATTENTION",
            &[
                "Seek medical attention promptly",
                "Stay hydrated with water while awaiting medical care",
            ],
            &[
                "Delaying medical treatment which can lead to serious complications",
                "Alcohol and caffeine which can worsen dehydration",
            ],
            "This condition typically requires antibiotics and possibly hospitalization",
        ),
        combination(
            &["excessive thirst", "frequent urination", "fatigue", "unexplained weight loss"],
            "Possible Diabetes",
            &[
                "See a doctor for proper evaluation and blood testing",
                "Stay hydrated with water",
            ],
            &[
                "Sugary foods and beverages",
                "Delaying medical evaluation",
            ],
            "This condition requires proper medical diagnosis and management",
        ),
        combination(
            &["suicidal thoughts", "hopelessness", "depression", "withdrawal"],
            "Possible Mental Health Crisis - REQUIRES IMMEDIATE ATTENTION",
            &[
                "Call a crisis hotline immediately - National Suicide Prevention Lifeline: 988",
                "Do not leave the person alone if possible",
            ],
            &[
                "Dismissing or minimizing their feelings",
                "Delay in seeking professional help",
            ],
            "Seek professional mental health care urgently",
        ),
    ]
}
