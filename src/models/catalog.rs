use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: u64,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub status: &'static str,
    pub progress: u8,
    pub budget: &'static str,
    pub timeline: &'static str,
    pub contractor: &'static str,
    pub description: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub impact_level: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfrastructureAsset {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub condition: &'static str,
    pub last_inspection: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// One year of urban growth metrics derived from satellite imagery.
#[derive(Debug, Clone, Serialize)]
pub struct GrowthSample {
    pub year: u16,
    pub built_up_area: f64,
    pub green_space: f64,
    pub population_density: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bottleneck {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub location: &'static str,
    pub severity: &'static str,
    pub duration: &'static str,
    pub impact: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedProject {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub budget: &'static str,
    pub timeline: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Regulations {
    pub zoning_restrictions: Vec<&'static str>,
    pub environmental_requirements: Vec<&'static str>,
    pub permit_requirements: Vec<&'static str>,
}
