//! Reviewed, static prose used whenever model output cannot be trusted.
//!
//! Nothing in here is generated at runtime beyond string interpolation of the
//! use-case label and the input description.

use super::types::{DetailedParameters, KnownUseCase, PlanStep, UseCase};

// Defaults applied when mapping an analysis into the finalized report.
pub const DEFAULT_HEALTH_PERCENTAGE: u8 = 50;
pub const DEFAULT_CURRENT_USE: &str = "Use with caution; treat before sensitive uses.";
pub const DEFAULT_DANGERS: &str = "Possible microbial or chemical contaminants.";
pub const DEFAULT_PURIFY: &str = "Filter and disinfect before your selected use.";

// Concise (simplified) fallback record.
pub const CONCISE_RISK: &str = "Potential risks include microbial contamination and chemical impurities. Professional water testing advised for accurate risk assessment.";
pub const CONCISE_PURIFY: &str = "Filter through clean cloth, boil for 1 minute, or use purification tablets. Store in clean containers and avoid recontamination.";

pub fn concise_safety(use_case: &UseCase) -> String {
    format!(
        "Unable to fully assess safety for {} use. Exercise caution and consider professional testing. Basic filtration and disinfection recommended.",
        use_case
    )
}

// Detailed (comprehensive) fallback record.
pub const FALLBACK_HEALTH_PERCENTAGE: u8 = 45;
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

pub fn fallback_assessment(input: &str, use_case: &UseCase) -> String {
    format!(
        "Limited analysis available for the provided water data: '{}'. Due to processing constraints, this assessment relies on basic safety protocols and conservative estimates. For {} use, professional water testing is strongly recommended to obtain accurate safety determinations. The evaluation considers general water safety principles and common contamination patterns, but cannot provide specific risk assessments without comprehensive laboratory analysis.",
        input, use_case
    )
}

pub fn fallback_safety(use_case: &UseCase) -> String {
    format!(
        "Current safety for {} use cannot be fully determined without additional testing data. Conservative safety measures are recommended until proper analysis is completed. Basic treatment methods should be applied as precautionary measures, with professional consultation sought for definitive safety guidance.",
        use_case
    )
}

pub const FALLBACK_RISK: &str = "Risk assessment is limited due to insufficient data. Potential hazards include microbial contamination, chemical contaminants, and physical impurities. The severity and likelihood of these risks cannot be accurately determined without proper testing. Conservative treatment approaches are recommended to minimize potential exposure.";

pub const FALLBACK_ENVIRONMENT: &str = "Environmental factors affecting water quality cannot be fully assessed with available information. Source characteristics, seasonal variations, and local contamination sources should be investigated to improve safety determinations. Local water quality reports and professional consultation can provide valuable additional context.";

pub fn fallback_rationale(error: Option<&str>) -> String {
    let diagnostic = error
        .map(|e| format!("Processing error encountered: {}. ", e))
        .unwrap_or_default();
    format!(
        "Assessment methodology is limited by available data constraints. {}Standard safety protocols are applied as precautionary measures. Confidence levels are reduced due to insufficient information for comprehensive analysis. Professional water testing is strongly recommended for accurate safety assessment.",
        diagnostic
    )
}

pub const FALLBACK_LONG_TERM: &str = "Long-term safety cannot be determined without ongoing monitoring and periodic testing. Regular water quality assessments are essential for sustained safe use. Treatment systems require maintenance and periodic updates to ensure continued effectiveness. Professional consultation is recommended for long-term water management planning.";

pub const FALLBACK_EMERGENCY: &str = "If any adverse health effects occur after water use, discontinue immediately and seek medical attention. Alternative water sources should be identified and prepared for emergency use. Contact local health authorities if multiple people experience similar symptoms. Keep detailed records of water sources and treatment methods for medical reference.";

pub fn fallback_parameters() -> DetailedParameters {
    DetailedParameters {
        ph_analysis: "pH level unknown - testing required for accurate assessment".to_string(),
        turbidity_analysis: "Turbidity level unknown - visual inspection and testing recommended".to_string(),
        chemical_analysis: "Chemical composition unknown - laboratory testing required".to_string(),
        biological_analysis: "Microbial content unknown - biological testing essential for safety".to_string(),
        physical_analysis: "Physical characteristics require professional evaluation".to_string(),
    }
}

// Enhancement content, swapped in wholesale when the model answer is too thin.

pub fn enhanced_assessment(input: &str, use_case: &UseCase) -> String {
    match use_case.template_key() {
        KnownUseCase::Drinking => format!(
            "Based on the provided water analysis data '{}', this water source requires comprehensive evaluation before consumption. The assessment considers multiple factors including visual clarity, chemical composition, potential microbial contamination, and source reliability. For drinking water purposes, safety standards are extremely strict as waterborne illnesses can cause serious health complications. The evaluation process examines pH levels, turbidity, chemical contaminants, and biological indicators to determine potability. Environmental factors such as source location, seasonal variations, and upstream activities significantly impact water quality and must be considered in the final safety determination.",
            input
        ),
        KnownUseCase::Irrigation => "The water sample analysis for irrigation purposes reveals several important considerations for agricultural use. Irrigation water quality directly impacts soil health, crop yield, and long-term agricultural sustainability. Key factors include salt content, pH levels, and potential chemical contaminants that could accumulate in soil over time. The assessment evaluates the water's suitability for different crop types, as some plants are more sensitive to water quality variations than others. Proper irrigation practices and ongoing monitoring are essential to prevent soil degradation and ensure optimal plant health.".to_string(),
        KnownUseCase::Human => "For hygiene and cleaning applications, this water source presents specific considerations related to skin contact and indirect exposure risks. While standards for hygiene water are less stringent than drinking water, certain contaminants can still cause skin irritation, allergic reactions, or other health issues. The assessment examines bacterial content, chemical residues, and physical contaminants that might affect cleaning effectiveness or pose contact risks. Proper treatment and handling procedures can significantly improve safety for personal hygiene use.".to_string(),
        KnownUseCase::Animals => "Animal water consumption requirements vary significantly by species, size, and sensitivity levels. This assessment considers the specific needs and tolerances of different animals, as some species are more resilient to water quality variations while others require nearly potable-quality water. Factors such as heavy metals, bacterial contamination, and chemical residues are evaluated for their potential impact on animal health, reproduction, and productivity. Long-term exposure effects and species-specific vulnerabilities are important considerations in the safety determination.".to_string(),
    }
}

pub fn enhanced_safety(use_case: &UseCase) -> String {
    format!(
        "For {} use, the current safety profile shows moderate concerns that require attention. The primary considerations include potential contamination risks, treatment requirements, and monitoring protocols. Based on available data, immediate use may present risks that can be mitigated through appropriate treatment methods. The safety assessment considers both acute and chronic exposure scenarios to provide comprehensive guidance.",
        use_case
    )
}

pub const ENHANCED_RISK: &str = "The comprehensive risk assessment identifies several categories of potential hazards. Microbial risks include bacteria, viruses, and parasites that could cause immediate illness. Chemical risks encompass both natural minerals and artificial contaminants that may accumulate over time. Physical contaminants such as sediment and debris can affect taste, appearance, and equipment function. The likelihood and severity of each risk category varies based on source characteristics and intended use patterns.";

pub const ENHANCED_ENVIRONMENT: &str = "Environmental factors significantly influence water quality and treatment requirements. Source location, seasonal weather patterns, upstream activities, and local geology all contribute to water characteristics. Understanding these environmental influences helps predict quality variations and plan appropriate treatment strategies. Regional water quality trends and local contamination sources provide important context for ongoing monitoring and safety protocols.";

pub const ENHANCED_RATIONALE: &str = "The assessment methodology combines visual inspection, available test data, and established water quality standards to generate safety recommendations. Confidence levels reflect data completeness and measurement reliability. Scientific principles guide the interpretation of chemical indicators, biological markers, and physical characteristics. The analysis follows established protocols while acknowledging limitations in available data and testing capabilities.";

pub const ENHANCED_LONG_TERM: &str = "Long-term water use patterns require ongoing monitoring and periodic reassessment. Health effects from chronic exposure may differ significantly from acute risks. System maintenance, source protection, and quality verification protocols help ensure sustained safety over time. Regular testing schedules and treatment system updates are essential components of comprehensive water management strategies.";

pub const ENHANCED_EMERGENCY: &str = "In case of suspected water-related illness, immediately discontinue use and seek medical attention. Alternative water sources should be identified and maintained as backup options. Emergency contact information for water quality professionals and health authorities should be readily available. Documentation of symptoms, exposure duration, and treatment methods helps medical professionals provide appropriate care.";

/// Five-step purification protocol for a use case.
pub fn purification_steps(use_case: &UseCase) -> &'static str {
    match use_case.template_key() {
        KnownUseCase::Drinking => "Step 1: Initial Assessment - Examine water visually for color, clarity, odor, and visible contaminants. Allow turbid water to settle for 30-60 minutes to separate sediment. Record observations for treatment planning.

Step 2: Pre-filtration - Use clean cloth, coffee filter, or sand/gravel filter to remove visible particles. For cloth filtration, use tightly woven fabric and filter slowly. Replace or clean filter material between uses.

Step 3: Primary Disinfection - Boil water at rolling boil for 1 minute at sea level (3 minutes above 6,500 feet elevation). Alternatively, use water purification tablets following manufacturer instructions exactly. UV sterilization requires clear water and proper exposure time.

Step 4: Chemical Treatment - If chlorine taste is strong, use activated carbon filter or let water sit uncovered for 30 minutes to reduce chlorine levels. Carbon filters must be replaced regularly to maintain effectiveness.

Step 5: Final Storage - Store treated water in clean, covered containers made of food-grade materials. Label with treatment date and use within 24 hours if unrefrigerated. Avoid recontamination during storage and dispensing.",
        KnownUseCase::Irrigation => "Step 1: Sediment Management - Allow water to settle in holding tank or pond for 2-4 hours minimum. Remove settled particles using bottom drain or pumping from upper levels. Install coarse mesh screens to prevent large debris entry.

Step 2: pH Testing and Adjustment - Test pH using digital meter or test strips. Most crops prefer pH 6.0-7.5. Add agricultural lime to raise pH or sulfur to lower pH. Mix thoroughly and retest after 30 minutes.

Step 3: Filtration System - Install appropriate filtration based on water quality and crop sensitivity. Sand filters work for particle removal, while activated carbon removes chemicals. Size filter system for flow rate requirements.

Step 4: Application Method - Use drip irrigation or subsurface application when possible to minimize plant contact with untreated water. Avoid overhead watering on leafy vegetables or crops consumed raw.

Step 5: Monitoring Protocol - Test soil pH and nutrient levels monthly. Flush irrigation lines weekly with clean water. Monitor plants for signs of stress or contamination. Keep detailed records of water source and treatment methods.",
        KnownUseCase::Human => "Step 1: Basic Filtration - Remove visible particles using cloth filter or settling process. This improves appearance and reduces skin irritation potential. Use multiple filter layers for heavily contaminated water.

Step 2: Temperature Preparation - Heat water to appropriate temperature for intended use. Hot water (120-140°F) improves cleaning effectiveness and kills some pathogens. Cool to comfortable temperature before use.

Step 3: Light Disinfection - For bathing water, add 1-2 drops of unscented chlorine bleach per quart of water. Mix thoroughly and let stand 30 minutes before use. Not necessary for laundry or general cleaning.

Step 4: Safe Usage Practices - Avoid splashing water in eyes, nose, or mouth during use. Use clean containers and utensils for water handling. Limit storage time to prevent bacterial growth in treated water.

Step 5: Waste Management - Dispose of used water appropriately to prevent contamination of clean water sources. Do not allow runoff into food preparation areas or drinking water supplies.",
        KnownUseCase::Animals => "Step 1: Debris Removal - Filter out visible particles, debris, and contaminants that could harm animals. Use mesh straining or settling process appropriate for water volume requirements.

Step 2: Basic Treatment - Consider mild chlorination for livestock (consult veterinarian for species-specific dosage). Some animals are more sensitive to chemicals than others. Test small amounts first.

Step 3: Container Preparation - Clean all water troughs and containers thoroughly with appropriate disinfectants. Rinse completely to remove cleaning residues that could harm animals.

Step 4: Distribution Setup - Provide water in clean, elevated containers when possible. Ensure easy access but prevent contamination from animal waste. Install drainage to prevent standing water around containers.

Step 5: Health Monitoring - Watch animals closely for signs of illness, reluctance to drink, or changes in behavior. Maintain alternative clean water source as backup. Document any health issues for veterinary consultation.",
    }
}

/// Plan used when the purify text has no usable step structure.
pub fn static_plan() -> Vec<PlanStep> {
    vec![
        PlanStep::new("Filter water", "Use clean cloth or filter to remove visible particles."),
        PlanStep::new("Disinfect", "Boil for 1 minute or use purification tablets."),
        PlanStep::new("Safe storage", "Store in clean containers, avoid recontamination."),
    ]
}
