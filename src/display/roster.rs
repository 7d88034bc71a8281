//! Roster display formatting

use crate::models::Participant;

/// Format the cuadrilla as a table
pub fn format_roster(participants: &[Participant]) -> String {
    if participants.is_empty() {
        return "The cuadrilla is empty. Add someone with 'barbacoa roster add NAME'.".to_string();
    }

    let name_width = participants
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let partner_width = participants
        .iter()
        .filter_map(|p| p.partner.as_ref())
        .map(|p| p.chars().count())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = format!(
        "{:<name_width$}  {:<partner_width$}  Color\n{:-<name_width$}  {:-<partner_width$}  {:-<7}\n",
        "Name", "Partner", "", "", ""
    );

    for participant in participants {
        output.push_str(&format!(
            "{:<name_width$}  {:<partner_width$}  {}\n",
            participant.name,
            participant.partner.as_deref().unwrap_or("-"),
            participant.color.as_deref().unwrap_or(""),
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_table() {
        let mut ana = Participant::with_partner("Ana", "Luis");
        ana.color = Some("#ff0000".into());
        let text = format_roster(&[ana, Participant::new("Marta")]);

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("Ana"));
        assert!(lines[2].contains("Luis"));
        assert!(lines[2].ends_with("#ff0000"));
        assert!(lines[3].contains(" -"));
    }

    #[test]
    fn test_empty_roster() {
        assert!(format_roster(&[]).contains("empty"));
    }
}
