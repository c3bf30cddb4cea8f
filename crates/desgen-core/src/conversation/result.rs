//! Generation result shape.

use serde::{Deserialize, Serialize};

/// Display label of the product plan section.
pub const PRODUCT_PLAN_LABEL: &str = "Product plan";
/// Display label of the UX design section.
pub const UX_DESIGN_LABEL: &str = "UX design";
/// Display label of the visual design section.
pub const VISUAL_DESIGN_LABEL: &str = "Visual design";

/// The fixed-shape response of the generation backend.
///
/// Transient: never persisted as its own entity. It is decomposed into
/// three assistant entries via [`sections`](Self::sections).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub product_plan: String,
    pub ux_design: String,
    pub visual_design: String,
}

impl GenerationResult {
    /// Returns the labeled sections in their fixed display order.
    ///
    /// The ordering [Product plan, UX design, Visual design] is a
    /// user-facing contract; persistence must follow it.
    pub fn sections(&self) -> [(&'static str, &str); 3] {
        [
            (PRODUCT_PLAN_LABEL, self.product_plan.as_str()),
            (UX_DESIGN_LABEL, self.ux_design.as_str()),
            (VISUAL_DESIGN_LABEL, self.visual_design.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_keep_fixed_order() {
        let result = GenerationResult {
            product_plan: "P".to_string(),
            ux_design: "X".to_string(),
            visual_design: "V".to_string(),
        };

        let labels: Vec<&str> = result.sections().iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["Product plan", "UX design", "Visual design"]);
    }

    #[test]
    fn test_deserializes_backend_body() {
        let body = r#"{"product_plan":"P","ux_design":"X","visual_design":"V"}"#;
        let result: GenerationResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.product_plan, "P");
        assert_eq!(result.visual_design, "V");
    }
}
