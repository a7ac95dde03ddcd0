pub const NO_RECOMMENDATION: &str = "No recommendation available.";

const UNDER_CONTROL: &str = "Your asthma condition is currently under control. Continue to monitor your symptoms regularly.";

const MILD: &str = concat!(
    "You are experiencing mild to moderate asthma symptoms. Try some home remedies such as:\n",
    "            1. Steam Inhalation: Inhale steam from hot water to open up the airways.\n",
    "            2. Staying Hydrated: Drink plenty of water to keep the airways moist.\n",
    "            3. Using a Humidifier: Add moisture to the air with a humidifier to prevent dryness in the airways.\n",
    "            4. Breathing Exercises: Practice deep breathing exercises and pursed-lip breathing to improve lung function.\n",
    "            5. Avoiding Triggers: Identify and avoid triggers such as smoke, dust, pollen, and pet dander.\n",
    "            6. Maintaining a Clean Environment: Keep the home clean and free of dust, mold, and allergens.",
);

const MODERATE: &str = "You are experiencing mild to moderate asthma symptoms. Follow the same home remedies as mentioned above and consider seeing a healthcare provider if symptoms persist or worsen.";

const SEVERE: &str = concat!(
    "You are experiencing severe asthma symptoms. Please seek immediate medical attention. In the meantime, you may find the following resources helpful:\n",
    "            1. <a href=\"https://www.youtube.com/watch?v=FyjZLPmZ534\">How to ease asthma symptoms - 3 effective breathing exercises by Airofit</a>\n",
    "            2. <a href=\"https://www.youtube.com/watch?v=B8pNeYFZNew\">Exercise-Induced Asthma by CNN</a>\n",
    "            3. <a href=\"https://www.youtube.com/watch?v=jv-revgQdPE\">ASTHMA / how to cure exercise induced wheezing naturally by Andrew Folts</a>\n",
    "            4. <a href=\"https://www.youtube.com/watch?v=JwRG8AsStLQ\">Easy tips to treat Asthma & Bronchitis | Dr. Hansaji Yogendra by The Yoga Institute</a>\n",
    "            5. <a href=\"https://www.youtube.com/watch?v=dpTNUGwXbTU\">Breathing Exercises for COPD, Asthma, Bronchitis & Emphysema - Ask Doctor Jo by AskDoctorJo</a>",
);

/// Guidance text for a severity code. Total over `i64`.
pub fn recommend(code: i64) -> &'static str {
    match code {
        0 => UNDER_CONTROL,
        1 => MILD,
        2 => MODERATE,
        3 => SEVERE,
        _ => NO_RECOMMENDATION,
    }
}
