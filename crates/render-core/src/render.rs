use crate::types::RenderBlock;
use pmforge_types::{
    ArtifactContent, ArtifactType, Charter, RiskRegister, StakeholderRegister, WorkBreakdown,
};

/// Turns a strict artifact into the ordered block sequence of its document.
///
/// The title comes from `kind`, the body from `content`. The input is assumed
/// to be post-coercion and is not re-validated.
pub fn render(kind: ArtifactType, content: &ArtifactContent) -> Vec<RenderBlock> {
    if kind.shape() != content.shape() {
        log::warn!(
            "Rendering {:?} content under the '{}' title",
            content.shape(),
            kind
        );
    }

    let mut blocks = vec![RenderBlock::heading(kind.title(), 1)];
    match content {
        ArtifactContent::Charter(c) => charter(c, &mut blocks),
        ArtifactContent::RiskRegister(r) => risk_register(r, &mut blocks),
        ArtifactContent::StakeholderRegister(s) => stakeholder_register(s, &mut blocks),
        ArtifactContent::Tree(w) => outline(w, &mut blocks),
    }
    blocks
}

fn section(blocks: &mut Vec<RenderBlock>, title: &str) {
    blocks.push(RenderBlock::heading(title, 2));
}

fn bullets(blocks: &mut Vec<RenderBlock>, items: &[String]) {
    blocks.extend(items.iter().cloned().map(RenderBlock::BulletItem));
}

fn charter(c: &Charter, blocks: &mut Vec<RenderBlock>) {
    section(blocks, &c.project_name);
    blocks.push(RenderBlock::Paragraph(c.scope_summary.clone()));

    section(blocks, "Objectives");
    bullets(blocks, &c.objectives);

    section(blocks, "Deliverables");
    blocks.push(RenderBlock::table(
        ["Name", "Description"],
        c.deliverables
            .iter()
            .map(|d| [d.name.clone(), d.description.clone()])
            .collect(),
    ));

    section(blocks, "Milestones");
    blocks.push(RenderBlock::table(
        ["Milestone", "Estimated date"],
        c.milestones
            .iter()
            .map(|m| [m.name.clone(), m.date_estimate.clone().unwrap_or_default()])
            .collect(),
    ));

    section(blocks, "Constraints");
    bullets(blocks, &c.constraints);

    section(blocks, "Assumptions");
    bullets(blocks, &c.assumptions);

    section(blocks, "Budget");
    blocks.push(RenderBlock::Paragraph(c.budget_summary.clone()));

    section(blocks, "Duration");
    blocks.push(RenderBlock::Paragraph(c.duration_summary.clone()));

    section(blocks, "Stakeholders");
    blocks.push(RenderBlock::table(
        ["Role", "Responsibility"],
        c.stakeholders
            .iter()
            .map(|s| [s.role.clone(), s.responsibility.clone()])
            .collect(),
    ));

    section(blocks, "Approval criteria");
    bullets(blocks, &c.approval_criteria);
}

fn risk_register(r: &RiskRegister, blocks: &mut Vec<RenderBlock>) {
    blocks.push(RenderBlock::table(
        [
            "#",
            "Description",
            "Probability",
            "Impact",
            "Severity",
            "Mitigation",
            "Owner",
            "Status",
        ],
        r.risks
            .iter()
            .map(|risk| {
                [
                    risk.id.to_string(),
                    risk.description.clone(),
                    risk.probability.to_string(),
                    risk.impact.to_string(),
                    risk.severity.to_string(),
                    risk.mitigation.clone(),
                    risk.owner.clone(),
                    risk.status.to_string(),
                ]
            })
            .collect(),
    ));
}

fn stakeholder_register(s: &StakeholderRegister, blocks: &mut Vec<RenderBlock>) {
    blocks.push(RenderBlock::table(
        ["#", "Role/Name", "Interest", "Influence", "Strategy"],
        s.stakeholders
            .iter()
            .map(|sh| {
                [
                    sh.id.to_string(),
                    sh.name_role.clone(),
                    sh.interest.clone(),
                    sh.influence.to_string(),
                    sh.engagement_strategy.clone(),
                ]
            })
            .collect(),
    ));
}

/// Depth-first pre-order walk. Uses an explicit stack so arbitrarily deep
/// (user-edited) trees cannot exhaust the call stack.
fn outline(w: &WorkBreakdown, blocks: &mut Vec<RenderBlock>) {
    let mut stack: Vec<_> = w.phases.iter().rev().map(|node| (node, 0usize)).collect();
    while let Some((node, depth)) = stack.pop() {
        blocks.push(RenderBlock::TreeLine {
            depth,
            label: node.label(),
            emphasis: depth == 0,
        });
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmforge_coerce::coerce;
    use serde_json::json;

    fn headings(blocks: &[RenderBlock], level: u8) -> Vec<String> {
        blocks
            .iter()
            .filter_map(|b| match b {
                RenderBlock::Heading { text, level: l } if *l == level => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn tables(blocks: &[RenderBlock]) -> Vec<(&Vec<String>, &Vec<Vec<String>>)> {
        blocks
            .iter()
            .filter_map(|b| match b {
                RenderBlock::Table { headers, rows } => Some((headers, rows)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_wbs_tree_lines() {
        let content = coerce(
            ArtifactType::Wbs,
            &json!({"phases": [{"id": "1", "name": "Phase", "children": [{"id": "1.1", "name": "Task"}]}]}),
        )
        .unwrap();
        let blocks = render(ArtifactType::Wbs, &content);
        assert_eq!(
            &blocks[1..],
            &[
                RenderBlock::TreeLine { depth: 0, label: "1 Phase".into(), emphasis: true },
                RenderBlock::TreeLine { depth: 1, label: "1.1 Task".into(), emphasis: false },
            ]
        );
    }

    #[test]
    fn test_tree_pre_order() {
        let content = coerce(
            ArtifactType::Backlog,
            &json!({"phases": [
                {"id": "1", "name": "A", "children": [
                    {"id": "1.1", "name": "B", "children": [{"id": "1.1.1", "name": "C"}]},
                    {"id": "1.2", "name": "D"}
                ]},
                {"id": "2", "name": "E"}
            ]}),
        )
        .unwrap();
        let blocks = render(ArtifactType::Backlog, &content);
        assert_eq!(blocks[0], RenderBlock::heading("Product Backlog", 1));
        let lines: Vec<(usize, &str, bool)> = blocks[1..]
            .iter()
            .map(|b| match b {
                RenderBlock::TreeLine { depth, label, emphasis } => (*depth, label.as_str(), *emphasis),
                other => panic!("unexpected block {:?}", other),
            })
            .collect();
        assert_eq!(
            lines,
            vec![
                (0, "1 A", true),
                (1, "1.1 B", false),
                (2, "1.1.1 C", false),
                (1, "1.2 D", false),
                (0, "2 E", true),
            ]
        );
    }

    #[test]
    fn test_charter_section_order() {
        let content = coerce(
            ArtifactType::Charter,
            &json!({
                "project_name": "Portal",
                "scope_summary": "Scope",
                "objectives": ["O1", "O2"],
                "milestones": [{"name": "Kickoff"}],
                "approval_criteria": ["Signed"]
            }),
        )
        .unwrap();
        let blocks = render(ArtifactType::Charter, &content);

        assert_eq!(headings(&blocks, 1), vec!["Project Charter"]);
        assert_eq!(
            headings(&blocks, 2),
            vec![
                "Portal",
                "Objectives",
                "Deliverables",
                "Milestones",
                "Constraints",
                "Assumptions",
                "Budget",
                "Duration",
                "Stakeholders",
                "Approval criteria",
            ]
        );
        assert_eq!(blocks[2], RenderBlock::Paragraph("Scope".into()));
        assert_eq!(blocks[4], RenderBlock::BulletItem("O1".into()));
        assert_eq!(blocks[5], RenderBlock::BulletItem("O2".into()));

        let tables = tables(&blocks);
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[1].0, &vec!["Milestone".to_string(), "Estimated date".to_string()]);
        assert_eq!(tables[1].1, &vec![vec!["Kickoff".to_string(), String::new()]]);
        assert_eq!(blocks.last(), Some(&RenderBlock::BulletItem("Signed".into())));
    }

    #[test]
    fn test_risk_register_single_table() {
        let content = coerce(
            ArtifactType::RiskRegister,
            &json!({"risks": [
                {"description": "First", "probability": "alta", "owner": "PM"},
                {"id": 9, "description": "Second", "status": "cerrado"}
            ]}),
        )
        .unwrap();
        let blocks = render(ArtifactType::RiskRegister, &content);
        assert_eq!(blocks.len(), 2);
        let tables = tables(&blocks);
        let (headers, rows) = tables[0];
        assert_eq!(headers.len(), 8);
        assert_eq!(
            rows[0],
            vec!["1", "First", "alta", "medio", "medio", "", "PM", "abierto"]
        );
        assert_eq!(rows[1][0], "9");
        assert_eq!(rows[1][1], "Second");
        assert_eq!(rows[1][7], "cerrado");
    }

    #[test]
    fn test_tables_match_header_width() {
        let inputs = [
            (ArtifactType::Charter, json!({"deliverables": [{}, {}], "stakeholders": [{}]})),
            (ArtifactType::RiskRegister, json!({"risks": [{}, {}, {}]})),
            (ArtifactType::StakeholderRegister, json!({"stakeholders": [{"name": "A"}, {"name": "B"}]})),
        ];
        for (kind, raw) in inputs {
            let blocks = render(kind, &coerce(kind, &raw).unwrap());
            for (headers, rows) in tables(&blocks) {
                assert!(rows.iter().all(|r| r.len() == headers.len()), "{kind}");
            }
        }

        let blocks = render(
            ArtifactType::StakeholderRegister,
            &coerce(
                ArtifactType::StakeholderRegister,
                &json!({"stakeholders": [{"name": "A"}, {"name": "B"}]}),
            )
            .unwrap(),
        );
        let tables = tables(&blocks);
        let order: Vec<&str> = tables[0].1.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn test_charter_tables_keep_row_order() {
        let content = coerce(
            ArtifactType::Charter,
            &json!({
                "deliverables": [
                    {"name": "Design", "description": "Wireframes"},
                    {"name": "Build", "description": "Release 1"}
                ],
                "milestones": [
                    {"name": "Kickoff", "date_estimate": "2025-01"},
                    {"name": "Go-live", "date_estimate": "2025-06"}
                ],
                "stakeholders": [
                    {"role": "Sponsor", "responsibility": "Funding"},
                    {"role": "PMO", "responsibility": "Tracking"}
                ]
            }),
        )
        .unwrap();
        let blocks = render(ArtifactType::Charter, &content);
        let tables = tables(&blocks);
        assert_eq!(tables.len(), 3);

        let expected = [
            (["Name", "Description"], [["Design", "Wireframes"], ["Build", "Release 1"]]),
            (["Milestone", "Estimated date"], [["Kickoff", "2025-01"], ["Go-live", "2025-06"]]),
            (["Role", "Responsibility"], [["Sponsor", "Funding"], ["PMO", "Tracking"]]),
        ];
        for ((headers, rows), (want_headers, want_rows)) in tables.iter().zip(expected) {
            assert_eq!(*headers, &want_headers.map(String::from).to_vec());
            let rows: Vec<Vec<&str>> =
                rows.iter().map(|r| r.iter().map(String::as_str).collect()).collect();
            assert_eq!(rows, want_rows.map(|r| r.to_vec()).to_vec());
        }
    }
}
