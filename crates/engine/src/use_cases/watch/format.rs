//! Change-event formatter.
//!
//! Lines are HTML fragments for the host's chat log: actor name in bold,
//! every interpolated name escaped.

use gmwatch_domain::{format_number, ChangeEvent};

/// Render one event as a chat line.
pub fn render(event: &ChangeEvent) -> String {
    let actor = format!("<b>{}</b>", escape(event.actor()));
    match event {
        ChangeEvent::PrepSlotChanged {
            entry_name,
            rank,
            slot,
            spell_name,
            ..
        } => format!(
            "{} {} rank {} slot {} → {}",
            actor,
            escape(entry_name),
            rank,
            slot,
            escape(spell_name)
        ),
        ChangeEvent::SpellLearned {
            spell_name,
            entry_name,
            ..
        } => format!(
            "{} learned → {}{}",
            actor,
            escape(spell_name),
            in_entry(entry_name)
        ),
        ChangeEvent::SpellRemoved {
            spell_name,
            entry_name,
            ..
        } => format!(
            "{} unassigned → {}{}",
            actor,
            escape(spell_name),
            in_entry(entry_name)
        ),
        ChangeEvent::SpellMoved {
            spell_name,
            entry_name,
            ..
        } => format!(
            "{} moved → {}{}",
            actor,
            escape(spell_name),
            in_entry(entry_name)
        ),
        ChangeEvent::CurrencyChanged {
            denomination,
            delta,
            ..
        } => {
            let sign = if *delta > 0.0 { "+" } else { "" };
            format!(
                "{} Money: {}{} {}",
                actor,
                sign,
                format_number(*delta),
                escape(denomination)
            )
        }
        ChangeEvent::ResourceChanged {
            resource,
            old_value,
            new_value,
            ..
        } => format!(
            "{} {}: {} → {}",
            actor,
            escape(resource),
            format_number(*old_value),
            format_number(*new_value)
        ),
        ChangeEvent::ItemFieldChanged {
            item_name,
            field,
            old_value,
            new_value,
            ..
        } => format!(
            "{} {} {}: {} → {}",
            actor,
            escape(item_name),
            field,
            format_number(*old_value),
            format_number(*new_value)
        ),
        ChangeEvent::ConditionGained { condition, .. } => {
            format!("{} gained → {}", actor, escape(condition))
        }
        ChangeEvent::ConditionRemoved { condition, .. } => {
            format!("{} removed → {}", actor, escape(condition))
        }
    }
}

fn in_entry(entry_name: &Option<String>) -> String {
    entry_name
        .as_deref()
        .map(|name| format!(" ({})", escape(name)))
        .unwrap_or_default()
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gmwatch_domain::ItemField;

    #[test]
    fn prep_slot_line() {
        let line = render(&ChangeEvent::PrepSlotChanged {
            actor: "Ezren".into(),
            entry_name: "Arcane Prepared".into(),
            rank: 1,
            slot: 2,
            spell_name: "Fear".into(),
        });
        assert_eq!(line, "<b>Ezren</b> Arcane Prepared rank 1 slot 2 → Fear");
    }

    #[test]
    fn currency_lines_carry_sign() {
        let gain = render(&ChangeEvent::CurrencyChanged {
            actor: "Ezren".into(),
            denomination: "gp".into(),
            delta: 5.0,
        });
        let loss = render(&ChangeEvent::CurrencyChanged {
            actor: "Ezren".into(),
            denomination: "sp".into(),
            delta: -3.0,
        });
        assert_eq!(gain, "<b>Ezren</b> Money: +5 gp");
        assert_eq!(loss, "<b>Ezren</b> Money: -3 sp");
    }

    #[test]
    fn resource_and_item_lines() {
        let focus = render(&ChangeEvent::ResourceChanged {
            actor: "Ezren".into(),
            resource: "Focus".into(),
            old_value: 2.0,
            new_value: 1.0,
        });
        let potion = render(&ChangeEvent::ItemFieldChanged {
            actor: "Ezren".into(),
            item_name: "Healing Potion".into(),
            field: ItemField::Quantity,
            old_value: 3.0,
            new_value: 2.5,
        });
        assert_eq!(focus, "<b>Ezren</b> Focus: 2 → 1");
        assert_eq!(potion, "<b>Ezren</b> Healing Potion qty: 3 → 2.5");
    }

    #[test]
    fn spellbook_lines_mention_entry_when_known() {
        let learned = render(&ChangeEvent::SpellLearned {
            actor: "Ezren".into(),
            spell_name: "Fireball".into(),
            entry_name: Some("Arcane Prepared".into()),
        });
        let moved = render(&ChangeEvent::SpellMoved {
            actor: "Ezren".into(),
            spell_name: "Fireball".into(),
            entry_name: None,
        });
        assert_eq!(learned, "<b>Ezren</b> learned → Fireball (Arcane Prepared)");
        assert_eq!(moved, "<b>Ezren</b> moved → Fireball");
    }

    #[test]
    fn condition_lines() {
        let gained = render(&ChangeEvent::ConditionGained {
            actor: "Ezren".into(),
            condition: "Frightened".into(),
        });
        let removed = render(&ChangeEvent::ConditionRemoved {
            actor: "Ezren".into(),
            condition: "Frightened".into(),
        });
        assert_eq!(gained, "<b>Ezren</b> gained → Frightened");
        assert_eq!(removed, "<b>Ezren</b> removed → Frightened");
    }

    #[test]
    fn names_are_escaped() {
        let line = render(&ChangeEvent::ConditionGained {
            actor: "<script>".into(),
            condition: "Tom & Jerry's".into(),
        });
        assert_eq!(line, "<b>&lt;script&gt;</b> gained → Tom &amp; Jerry&#39;s");
    }
}
