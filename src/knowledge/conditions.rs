//! Built-in condition table.
//!
//! One entry per named illness. The `name` is the lookup key the resolver
//! scores symptoms against; `info` feeds keyword search.

use crate::models::{Condition, DiagnosisBundle};

fn condition(
    name: &str,
    diagnosis: &str,
    info: &str,
    recommendations: &[&str],
    avoid: &[&str],
    follow_up: &str,
) -> Condition {
    Condition {
        name: name.to_string(),
        info: info.to_string(),
        bundle: DiagnosisBundle::new(diagnosis, recommendations, avoid, follow_up),
    }
}

/// All built-in conditions, in declaration order.
pub fn builtin_conditions() -> Vec<Condition> {
    vec![
        condition(
            "common cold",
            "Common Cold",
            "The common cold is a viral infection of the upper respiratory tract. Symptoms usually include runny nose, sneezing, sore throat, cough, congestion, body aches, and sometimes a mild fever.",
            &[
                "Taking over-the-counter decongestants can help relieve nasal congestion",
                "Drinking hot tea with honey can soothe a sore throat",
            ],
            &[
                "Smoking and alcohol which can worsen symptoms",
                "Exposure to cold air which may irritate the throat",
            ],
            "If symptoms worsen after 7 days, consult a doctor",
        ),
        condition(
            "fever",
            "Fever of Unknown Origin",
            "Fever is a temporary increase in body temperature, often due to illness. A temperature above 100.4°F (38°C) is considered a fever.",
            &[
                "Taking acetaminophen or ibuprofen can help reduce fever",
                "Staying hydrated with plenty of fluids is essential",
            ],
            &[
                "Overdressing which can trap body heat",
                "Cold baths which can cause shivering and raise temperature",
            ],
            "If fever persists more than 3 days or exceeds 103°F, seek medical attention immediately",
        ),
        condition(
            "headache",
            "Tension Headache",
            "Headaches can be primary (not caused by another condition) or secondary (symptom of another condition). Tension headaches, migraines, and cluster headaches are common types.",
            &[
                "Over-the-counter pain relievers like ibuprofen can provide relief",
                "Regular breaks from screen time to reduce eye strain",
            ],
            &[
                "Known trigger foods such as aged cheese or processed meats",
                "Skipping meals which can trigger headaches",
            ],
            "If headaches persist or worsen, consult with a neurologist",
        ),
        condition(
            "sore throat",
            "Viral Pharyngitis",
            "A sore throat (pharyngitis) is pain, scratchiness or irritation of the throat that often worsens when swallowing. The most common cause is a viral infection or cold.",
            &[
                "Gargling with warm salt water every few hours",
                "Drinking warm herbal tea with honey for soothing relief",
            ],
            &[
                "Acidic or spicy foods that can irritate the throat",
                "Dry air - consider using a humidifier",
            ],
            "If white patches appear on tonsils or fever develops, consult a doctor for possible strep throat",
        ),
        condition(
            "cough",
            "Acute Bronchitis",
            "Coughing is a reflex that helps clear your airways of irritants. Coughs can be acute (lasting less than three weeks) or chronic (lasting more than eight weeks).",
            &[
                "Using a humidifier to add moisture to the air",
                "Taking honey (for adults) to soothe the throat and reduce coughing",
            ],
            &[
                "Smoking and exposure to secondhand smoke",
                "Lying flat immediately after eating which may worsen coughing at night",
            ],
            "If coughing persists beyond three weeks or produces colored phlegm, consult a doctor",
        ),
        condition(
            "flu",
            "Influenza (Flu)",
            "Influenza is a contagious respiratory illness caused by influenza viruses. Symptoms include fever, cough, sore throat, body aches, fatigue, and sometimes vomiting and diarrhea.",
            &[
                "Taking ibuprofen can help reduce fever and pain",
                "Rest and adequate hydration are essential for recovery",
            ],
            &[
                "Having cold food and drinks",
                "Contact with others to prevent spreading the virus",
            ],
            "If symptoms persist or worsen after a week, consult a doctor",
        ),
        condition(
            "allergies",
            "Seasonal Allergic Rhinitis",
            "Allergies occur when your immune system reacts to a foreign substance. Symptoms include sneezing, itching, runny nose, and watery eyes.",
            &[
                "Over-the-counter antihistamines can provide relief from symptoms",
                "Using a HEPA filter in your bedroom can reduce allergen exposure",
            ],
            &[
                "Outdoor activities during high pollen counts",
                "Keeping windows open during allergy season",
            ],
            "If symptoms don't improve with over-the-counter medications, consult an allergist",
        ),
        condition(
            "migraine",
            "Migraine Headache",
            "Migraines are intense headaches that can cause throbbing pain, usually on one side of the head, often accompanied by nausea, vomiting, and sensitivity to light and sound.",
            &[
                "Resting in a quiet, dark room during attacks",
                "Applying cold compresses to the forehead",
            ],
            &[
                "Known trigger foods like chocolate, aged cheese, or red wine",
                "Bright lights and loud noises during episodes",
            ],
            "Consider consulting a neurologist if migraines are frequent or debilitating",
        ),
        condition(
            "pneumonia",
            "Pneumonia",
            "Pneumonia is an infection that inflames the air sacs in one or both lungs. The air sacs may fill with fluid or pus, causing cough with phlegm, fever, chills, and difficulty breathing.",
            &[
                "Complete the full course of antibiotics if prescribed",
                "Rest and stay hydrated to help your body recover",
            ],
            &[
                "Smoking and exposure to secondhand smoke",
                "Strenuous activity until fully recovered",
            ],
            "If symptoms worsen or don't improve with treatment, seek medical attention immediately",
        ),
        condition(
            "heart attack",
            "Possible Heart Attack - MEDICAL EMERGENCY",
            "A heart attack occurs when blood flow to part of the heart is blocked, causing damage to heart muscle. Symptoms include chest pain or pressure, pain spreading to jaw/neck/back, nausea, shortness of breath, and cold sweat.",
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
        condition(
            "stroke",
            "Possible Stroke - MEDICAL EMERGENCY",
            "A stroke occurs when blood flow to part of the brain is blocked or when a blood vessel in the brain bursts. Brain tissue deprived of oxygen begins to die within minutes. Remember FAST: Face drooping, Arm weakness, Speech difficulty, Time to call 911.",
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
        condition(
            "appendicitis",
            "Possible Appendicitis - REQUIRES MEDICAL ATTENTION",
            "Appendicitis is inflammation of the appendix that can lead to rupture if untreated. Symptoms typically begin with pain near the navel that moves to the lower right abdomen, along with nausea, vomiting, and low-grade fever.",
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
        condition(
            "meningitis",
            "Possible Meningitis - MEDICAL EMERGENCY",
            "Meningitis is inflammation of the membranes surrounding the brain and spinal cord. Viral meningitis may improve without treatment, but bacterial meningitis is serious and can be life-threatening requiring immediate antibiotic treatment.",
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
        condition(
            "asthma",
            "Asthma",
            "Asthma is a condition in which your airways narrow, swell and produce extra mucus, making breathing difficult and triggering coughing, wheezing and shortness of breath.",
            &[
                "Use rescue inhaler as prescribed for acute symptoms",
                "Identify and avoid personal triggers",
            ],
            &[
                "Known triggers such as allergens, smoke, or pollution",
                "Extreme cold air which can trigger symptoms",
            ],
            "Work with a doctor to develop an asthma action plan",
        ),
        condition(
            "urinary tract infection",
            "Urinary Tract Infection",
            "A UTI is an infection in any part of the urinary system, including kidneys, bladder, ureters and urethra. Most infections involve the lower urinary tract: the bladder and urethra.",
            &[
                "See a doctor for antibiotics which are typically needed",
                "Drink plenty of water to help flush bacteria",
            ],
            &[
                "Caffeine, alcohol, and spicy foods which can irritate the bladder",
                "Delaying urination when you feel the need to go",
            ],
            "Complete the full course of antibiotics if prescribed",
        ),
        condition(
            "kidney infection",
            "Kidney Infection - REQUIRES PROMPT ATTENTION",
            "A kidney infection is a type of urinary tract infection that begins in the urethra or bladder and travels up to one or both kidneys. Symptoms include high fever, abdominal and back pain, and painful urination.",
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
        condition(
            "diabetes",
            "Possible Diabetes",
            "Diabetes is a disease that occurs when your blood glucose (blood sugar) is too high. Insulin, a hormone made by the pancreas, helps glucose get into your cells to be used for energy. With diabetes, your body either doesn't make enough insulin or can't effectively use the insulin it makes.",
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
        condition(
            "food poisoning",
            "Food Poisoning",
            "Food poisoning is illness caused by eating contaminated food. Symptoms often include nausea, vomiting, and diarrhea, which may be severe in some cases.",
            &[
                "Stay hydrated with clear fluids sipped slowly",
                "Rest and let your digestive system recover",
            ],
            &[
                "Dairy products, caffeine, and alcohol",
                "Solid foods until vomiting stops",
            ],
            "If symptoms persist more than 3 days or include bloody diarrhea, see a doctor",
        ),
        condition(
            "pulmonary embolism",
            "Possible Pulmonary Embolism - MEDICAL EMERGENCY",
            "A pulmonary embolism is a blockage in one of the pulmonary arteries in your lungs, most commonly caused by blood clots that travel from the legs or other parts of the body to the lungs.",
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
        condition(
            "shingles",
            "Shingles",
            "Shingles is a viral infection that causes a painful rash. It is caused by the varicella-zoster virus, the same virus that causes chickenpox. After you've had chickenpox, the virus lies inactive in nerve tissue. Years later, the virus may reactivate as shingles.",
            &[
                "See a doctor promptly - antiviral medication works best if started early",
                "Keep the rash clean and covered to prevent spreading to others",
            ],
            &[
                "Scratching the rash which can lead to infection",
                "Contact with pregnant women, infants, and those with weakened immune systems",
            ],
            "Complete the full course of any prescribed medications",
        ),
        condition(
            "bronchitis",
            "Bronchitis",
            "Bronchitis is inflammation of the lining of the bronchial tubes, which carry air to and from the lungs. People with bronchitis often cough up thickened mucus, which can be discolored.",
            &[
                "Rest and drink plenty of fluids to thin mucus secretions",
                "Use a humidifier or steam to help loosen congestion",
            ],
            &[
                "Smoking and exposure to secondhand smoke or other respiratory irritants",
                "Cold, dry air which can aggravate symptoms",
            ],
            "If symptoms persist longer than 3 weeks or include high fever, see a doctor",
        ),
        condition(
            "anxiety",
            "Anxiety Disorder",
            "Anxiety disorders are a group of mental health conditions characterized by significant feelings of anxiety and fear. These feelings are strong enough to interfere with one's daily activities.",
            &[
                "Practice deep breathing exercises when feeling anxious",
                "Consider speaking with a mental health professional for proper evaluation",
            ],
            &[
                "Caffeine and alcohol which can worsen anxiety",
                "Avoiding feared situations, which can reinforce anxiety",
            ],
            "A mental health professional can help develop an effective treatment plan",
        ),
        condition(
            "depression",
            "Depression",
            "Depression is a common and serious medical illness that negatively affects how you feel, the way you think and how you act. It causes feelings of sadness and/or a loss of interest in activities you once enjoyed.",
            &[
                "Consider speaking with a mental health professional for proper evaluation",
                "Regular physical activity can help improve mood",
            ],
            &[
                "Social isolation which can worsen symptoms",
                "Alcohol and drugs which can worsen depression",
            ],
            "A mental health professional can help develop an effective treatment plan",
        ),
        condition(
            "back pain",
            "Lower Back Pain/Strain",
            "Back pain is one of the most common reasons people seek medical care or miss work. Back pain can range from a muscle aching to a shooting, burning or stabbing sensation.",
            &[
                "Apply ice for the first 48-72 hours, then switch to heat",
                "Over-the-counter pain relievers can help manage pain and inflammation",
            ],
            &[
                "Prolonged bed rest which can weaken muscles",
                "Heavy lifting and twisting movements",
            ],
            "If pain persists more than two weeks or is severe, consult a doctor",
        ),
        condition(
            "arthritis",
            "Arthritis",
            "Arthritis is inflammation of one or more joints, causing pain and stiffness that can worsen with age. The most common types are osteoarthritis and rheumatoid arthritis.",
            &[
                "Over-the-counter anti-inflammatory medications can reduce pain and swelling",
                "Gentle exercises like swimming can help maintain joint mobility",
            ],
            &[
                "High-impact activities that can stress affected joints",
                "Remaining in one position for too long",
            ],
            "A doctor can determine the specific type of arthritis and recommend appropriate treatment",
        ),
    ]
}
