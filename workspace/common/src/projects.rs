use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A search hit in the DIY catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProjectSummaryDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[schema(value_type = Option<String>)]
    pub avg_price: Option<Decimal>,
    pub step_count: i32,
    pub estimated_time_minutes: Option<i32>,
    pub is_rental_safe: bool,
    pub requires_drilling: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProjectStepDto {
    pub step_number: i32,
    pub instruction_text: String,
}

/// A DIY project with its materials, tools and ordered steps.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProjectDetailDto {
    #[serde(flatten)]
    pub summary: ProjectSummaryDto,
    pub materials: Vec<String>,
    pub tools: Vec<String>,
    pub steps: Vec<ProjectStepDto>,
}
