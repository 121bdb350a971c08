//! Per-artifact field declarations.

use crate::fields::Fields;
use pmforge_types::{
    ArtifactContent, ArtifactShape, ArtifactType, Charter, CharterStakeholder, Deliverable,
    Milestone, Risk, RiskRegister, Stakeholder, StakeholderRegister, WbsNode, WorkBreakdown,
};
use serde_json::{Map, Value};

/// Nesting bound for WBS/backlog trees. Deeper nodes keep their id and name
/// but lose their children.
pub const MAX_TREE_DEPTH: usize = 64;

pub(crate) fn coerce_object(kind: ArtifactType, object: &Map<String, Value>) -> ArtifactContent {
    let fields = Fields::new(object);
    match kind.shape() {
        ArtifactShape::Charter => ArtifactContent::Charter(charter(fields)),
        ArtifactShape::RiskRegister => ArtifactContent::RiskRegister(risk_register(fields)),
        ArtifactShape::StakeholderRegister => {
            ArtifactContent::StakeholderRegister(stakeholder_register(fields))
        }
        ArtifactShape::Tree => ArtifactContent::Tree(work_breakdown(fields)),
    }
}

fn charter(f: Fields<'_>) -> Charter {
    Charter {
        project_name: f.text("project_name"),
        scope_summary: f.text("scope_summary"),
        objectives: f.text_list("objectives"),
        deliverables: f.list("deliverables", |d, _| Deliverable {
            name: d.text("name"),
            description: d.text("description"),
        }),
        milestones: f.list("milestones", |m, _| Milestone {
            name: m.text("name"),
            date_estimate: m.optional_text("date_estimate"),
        }),
        constraints: f.text_list("constraints"),
        assumptions: f.text_list("assumptions"),
        budget_summary: f.text("budget_summary"),
        duration_summary: f.text("duration_summary"),
        stakeholders: f.list("stakeholders", |s, _| CharterStakeholder {
            role: s.text("role"),
            responsibility: s.text("responsibility"),
        }),
        approval_criteria: f.text_list("approval_criteria"),
    }
}

fn risk_register(f: Fields<'_>) -> RiskRegister {
    RiskRegister {
        risks: f.list("risks", |r, position| Risk {
            id: r.row_id("id", position),
            description: r.text("description"),
            probability: r.closed("probability"),
            impact: r.closed("impact"),
            severity: r.closed("severity"),
            mitigation: r.text("mitigation"),
            owner: r.text("owner"),
            status: r.closed("status"),
        }),
    }
}

fn stakeholder_register(f: Fields<'_>) -> StakeholderRegister {
    StakeholderRegister {
        stakeholders: f.list("stakeholders", |s, position| Stakeholder {
            id: s.row_id("id", position),
            name_role: s.text_any(&["name_role", "name", "role"]),
            interest: s.text("interest"),
            influence: s.closed("influence"),
            engagement_strategy: s.text_any(&["engagement_strategy", "strategy"]),
        }),
    }
}

fn work_breakdown(f: Fields<'_>) -> WorkBreakdown {
    WorkBreakdown {
        phases: f.sequence("phases").iter().map(|n| tree_node(n, 0)).collect(),
    }
}

fn tree_node(value: &Value, depth: usize) -> WbsNode {
    let f = Fields::of(value);
    let children = f.sequence("children");
    let children = if children.is_empty() {
        Vec::new()
    } else if depth + 1 >= MAX_TREE_DEPTH {
        log::warn!(
            "WBS node '{}' exceeds the nesting limit of {}; dropping {} children",
            f.text("id"),
            MAX_TREE_DEPTH,
            children.len()
        );
        Vec::new()
    } else {
        children.iter().map(|c| tree_node(c, depth + 1)).collect()
    };
    WbsNode {
        id: f.text("id"),
        name: f.text("name"),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce(kind: ArtifactType, value: Value) -> ArtifactContent {
        coerce_object(kind, value.as_object().expect("test input is an object"))
    }

    #[test]
    fn test_charter_fields() {
        let content = coerce(
            ArtifactType::Charter,
            json!({
                "project_name": "Portal",
                "scope_summary": "Build it",
                "objectives": ["Ship"],
                "deliverables": [{"name": "API", "description": "REST"}, 7],
                "milestones": [{"name": "Go-live", "date_estimate": "2026-03"}, {"name": "Close"}],
                "budget_summary": 100000,
                "stakeholders": [{"role": "Sponsor", "responsibility": "Funding"}],
                "approval_criteria": ["Signed"]
            }),
        );
        let ArtifactContent::Charter(c) = content else {
            panic!("expected charter");
        };
        assert_eq!(c.project_name, "Portal");
        assert_eq!(c.deliverables.len(), 2);
        assert_eq!(c.deliverables[1], Deliverable::default());
        assert_eq!(c.milestones[0].date_estimate.as_deref(), Some("2026-03"));
        assert_eq!(c.milestones[1].date_estimate, None);
        assert_eq!(c.budget_summary, "100000");
        assert_eq!(c.duration_summary, "");
        assert!(c.constraints.is_empty());
        assert_eq!(c.stakeholders[0].role, "Sponsor");
    }

    #[test]
    fn test_stakeholder_aliases() {
        let content = coerce(
            ArtifactType::StakeholderRegister,
            json!({"stakeholders": [
                {"name": "CFO", "strategy": "Monthly report"},
                {"role": "Vendor", "engagement_strategy": "Weekly sync", "strategy": "ignored"}
            ]}),
        );
        let ArtifactContent::StakeholderRegister(s) = content else {
            panic!("expected stakeholder register");
        };
        assert_eq!(s.stakeholders[0].name_role, "CFO");
        assert_eq!(s.stakeholders[0].engagement_strategy, "Monthly report");
        assert_eq!(s.stakeholders[1].name_role, "Vendor");
        assert_eq!(s.stakeholders[1].engagement_strategy, "Weekly sync");
        assert_eq!(s.stakeholders[1].id.to_string(), "2");
    }

    #[test]
    fn test_tree_children_only_when_non_empty() {
        let content = coerce(
            ArtifactType::Wbs,
            json!({"phases": [
                {"id": "1", "name": "Phase", "children": [{"id": "1.1", "name": "Task", "children": []}]},
                {"id": "2", "name": "Other", "children": "none"},
                "garbage"
            ]}),
        );
        let ArtifactContent::Tree(w) = content else {
            panic!("expected tree");
        };
        assert_eq!(w.phases.len(), 3);
        assert_eq!(w.phases[0].children.len(), 1);
        assert!(w.phases[0].children[0].children.is_empty());
        assert!(w.phases[1].children.is_empty());
        assert_eq!(w.phases[2].label(), " ");
    }

    #[test]
    fn test_tree_depth_is_bounded() {
        let mut node = json!({"id": "leaf", "name": "leaf"});
        for level in 0..(MAX_TREE_DEPTH + 10) {
            node = json!({"id": level.to_string(), "name": "n", "children": [node]});
        }
        let content = coerce(ArtifactType::Backlog, json!({"phases": [node]}));
        let ArtifactContent::Tree(w) = content else {
            panic!("expected tree");
        };

        let mut depth = 0;
        let mut current = &w.phases[0];
        while let Some(child) = current.children.first() {
            current = child;
            depth += 1;
        }
        assert_eq!(depth, MAX_TREE_DEPTH - 1);
    }
}
