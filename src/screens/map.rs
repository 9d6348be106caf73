use crate::insights::EmissionTier;

/// Placeholder for a location view. No data, no state.
#[derive(Clone, Copy, Debug, Default)]
pub struct MapScreen;

impl MapScreen {
    pub const TITLE: &'static str = "Carbon Footprint Map";
    pub const DESCRIPTION: &'static str = "Visualize your carbon emissions across different locations. \
This map shows where your carbon footprint is concentrated.";
    pub const PLACEHOLDER: &'static str = "Carbon data visualization will appear here";
    pub const FEATURES: [&'static str; 4] = [
        "Location-based carbon tracking",
        "Emission hotspots visualization",
        "Regional comparison",
        "Travel route analysis",
    ];

    pub fn legend(&self) -> [EmissionTier; 3] {
        [EmissionTier::Low, EmissionTier::Medium, EmissionTier::High]
    }
}
