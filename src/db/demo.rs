use crate::models::catalog::{
    Bottleneck, GrowthSample, InfrastructureAsset, PlannedProject, Project, Regulations,
};
use crate::models::user::{Role, User};

pub fn users() -> Vec<User> {
    vec![
        User {
            id: 1,
            username: "admin".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
            email: "admin@citypulse.com".to_string(),
            credits: None,
            reports_submitted: None,
            reports_resolved: None,
        },
        User {
            id: 2,
            username: "johndoe".to_string(),
            password: "password123".to_string(),
            role: Role::Citizen,
            email: "john@example.com".to_string(),
            credits: Some(245),
            reports_submitted: Some(12),
            reports_resolved: Some(8),
        },
        User {
            id: 3,
            username: "sarahj".to_string(),
            password: "password123".to_string(),
            role: Role::Citizen,
            email: "sarah@example.com".to_string(),
            credits: Some(420),
            reports_submitted: Some(28),
            reports_resolved: Some(15),
        },
    ]
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Highway 101 Expansion",
            kind: "road",
            status: "in_progress",
            progress: 75,
            budget: "$45M",
            timeline: "Jan 2024 - Dec 2024",
            contractor: "ABC Construction",
            description: "Widening highway to 6 lanes",
            latitude: 37.7749,
            longitude: -122.4194,
            impact_level: "high",
        },
        Project {
            id: 2,
            name: "Central Park Renovation",
            kind: "public_space",
            status: "in_progress",
            progress: 45,
            budget: "$12M",
            timeline: "Mar 2024 - Nov 2024",
            contractor: "Green Spaces Inc",
            description: "Complete park renovation with new facilities",
            latitude: 37.7690,
            longitude: -122.4140,
            impact_level: "medium",
        },
    ]
}

pub fn infrastructure() -> Vec<InfrastructureAsset> {
    vec![
        InfrastructureAsset {
            id: 1,
            kind: "road",
            name: "Main Street",
            condition: "good",
            last_inspection: "2024-01-15",
            latitude: 37.7750,
            longitude: -122.4180,
        },
        InfrastructureAsset {
            id: 2,
            kind: "bridge",
            name: "Downtown Bridge",
            condition: "fair",
            last_inspection: "2023-11-20",
            latitude: 37.7760,
            longitude: -122.4170,
        },
        InfrastructureAsset {
            id: 3,
            kind: "power_grid",
            name: "North District Grid",
            condition: "excellent",
            last_inspection: "2024-02-01",
            latitude: 37.7780,
            longitude: -122.4150,
        },
    ]
}

pub fn growth_series() -> Vec<GrowthSample> {
    [
        (2020, 45.2, 32.1, 4200),
        (2021, 46.8, 31.5, 4320),
        (2022, 48.3, 30.8, 4450),
        (2023, 50.1, 29.9, 4610),
        (2024, 52.7, 28.7, 4780),
    ]
    .into_iter()
    .map(|(year, built_up_area, green_space, population_density)| GrowthSample {
        year,
        built_up_area,
        green_space,
        population_density,
    })
    .collect()
}

pub fn bottlenecks() -> Vec<Bottleneck> {
    vec![
        Bottleneck {
            id: 1,
            kind: "traffic",
            location: "Main St & 5th Ave",
            severity: "high",
            duration: "2+ hours daily",
            impact: "15-20 min delays",
        },
        Bottleneck {
            id: 2,
            kind: "construction",
            location: "Highway 101 Northbound",
            severity: "medium",
            duration: "3 months",
            impact: "Lane closures during rush hour",
        },
    ]
}

pub fn planned_projects() -> Vec<PlannedProject> {
    vec![
        PlannedProject {
            name: "Smart City Initiative Phase 2",
            kind: "digital_infrastructure",
            budget: "$30M",
            timeline: "2024-2026",
            status: "planned",
        },
        PlannedProject {
            name: "Public Transit Expansion",
            kind: "transportation",
            budget: "$120M",
            timeline: "2025-2027",
            status: "proposed",
        },
    ]
}

pub fn regulations() -> Regulations {
    Regulations {
        zoning_restrictions: vec!["height_limit_50m", "setback_10m"],
        environmental_requirements: vec!["green_building_cert", "stormwater_management"],
        permit_requirements: vec!["building_permit", "environmental_impact_assessment"],
    }
}
