//! Built-in demo data for the catalog commands.

use rust_decimal::Decimal;

use super::{NewProject, NewStep};

/// Stored asset details as (name, brand, model number).
pub const STORED_ASSETS: &[(&str, &str, &str)] = &[
    ("Under Sink Water Filter", "GE", "GXK140TNN"),
    ("50-Pint Dehumidifier", "GE", "APHL50LB"),
    ("PLUS Faucet Mount Filtration System", "PUR", "PFM400H"),
    ("Side-By-Side Refrigerator", "Frigidaire", "FRSS2623AS"),
    ("5 Burner Electric Range", "Frigidaire", "FCRE3052BS"),
    ("Front Control Smart Dishwasher", "Frigidaire", "FDPC4221AS"),
    ("Top Control Dishwasher", "Frigidaire", "FDPH4316AS"),
    ("Smart Front Load Washer", "LG", "WM4000HBA"),
];

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub fn demo_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            title: "Wooden Coffee Table".to_string(),
            description: "A sturdy coffee table built from dimensional lumber.".to_string(),
            avg_price: Some(Decimal::new(5000, 2)),
            estimated_time_minutes: Some(240),
            is_rental_safe: true,
            requires_drilling: true,
            materials: list(&["wood", "screws", "stain", "sandpaper"]),
            tools: list(&["screwdriver"]),
            steps: NewStep::numbered(&[
                "Cut to size",
                "Sand surfaces",
                "Assemble frame",
                "Attach top",
                "Apply stain",
            ]),
        },
        NewProject {
            title: "Macrame Wall Hanging".to_string(),
            description: "A knotted cotton wall hanging to decorate a bedroom.".to_string(),
            avg_price: Some(Decimal::new(1500, 2)),
            estimated_time_minutes: Some(120),
            is_rental_safe: true,
            requires_drilling: false,
            materials: list(&["cotton cord", "dowel"]),
            tools: list(&["scissors"]),
            steps: NewStep::numbered(&[
                "Cut the cord",
                "Tie the cord onto the dowel",
                "Create knot patterns",
                "Trim the ends",
            ]),
        },
        NewProject {
            title: "Floating Shelves".to_string(),
            description: "Wall-mounted shelves with hidden brackets.".to_string(),
            avg_price: Some(Decimal::new(6900, 2)),
            estimated_time_minutes: Some(180),
            is_rental_safe: false,
            requires_drilling: true,
            materials: list(&["wood", "brackets", "anchors", "screws"]),
            tools: list(&["drill", "screwdriver"]),
            steps: NewStep::numbered(&[
                "Measure wall",
                "Drill holes",
                "Install brackets",
                "Secure brackets",
            ]),
        },
    ]
}
