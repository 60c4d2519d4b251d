//! Human-readable justification for each suggested slot.
//!
//! Mirrors the scoring heuristics clause by clause; advisory text only.
//! User-facing strings are French, matching the planning frontend.

use chrono::{Datelike, NaiveDate, Timelike, Weekday};

use super::generator::Candidate;
use super::{DayContext, ScoringMode};

const SEPARATOR: &str = " | ";
const FALLBACK: &str = "Créneau disponible";

pub(crate) fn single_day(
    mode: ScoringMode,
    candidate: &Candidate,
    equipment: Option<&str>,
    ctx: &DayContext,
) -> String {
    let hour = candidate.start.hour();
    let mut clauses: Vec<String> = Vec::new();

    if let Some(name) = &ctx.prev_day_holiday {
        clauses.push(format!("Lendemain d'un jour férié ({})", name));
    }
    if let Some(name) = &ctx.next_day_holiday {
        clauses.push(format!("Veille d'un jour férié ({})", name));
    }

    if let Some(first) = ctx.sector_conflicts.first() {
        clauses.push(format!(
            "Charge secteur: PRS existant le {}",
            first.format("%d/%m")
        ));
    } else if mode == ScoringMode::Sectored && ctx.sector_known {
        clauses.push("Secteur libre cette semaine".to_string());
    }

    clauses.push(
        match hour {
            7..=8 => "Créneau en début de matinée",
            9..=10 => "Créneau en milieu de matinée",
            11..=12 => "Créneau en début d'après-midi",
            _ => "Créneau en fin de journée",
        }
        .to_string(),
    );

    match ctx.same_line_count {
        0 => clauses.push("Ligne libre ce jour-là".to_string()),
        1..=2 => clauses.push("Ligne peu chargée ce jour-là".to_string()),
        n if n >= 5 => clauses.push("Ligne très chargée ce jour-là".to_string()),
        _ => {}
    }

    if let Some(equip) = equipment {
        let lower = equip.to_lowercase();
        if lower.contains("cms") && (7..9).contains(&hour) {
            clauses.push("Matinée adaptée à l'équipement CMS".to_string());
        }
        if lower.contains("finition") && (11..13).contains(&hour) {
            clauses.push("Créneau adapté à l'équipement Finition".to_string());
        }
    }

    match ctx.weekday {
        Weekday::Mon | Weekday::Tue | Weekday::Wed => {
            clauses.push("Début de semaine favorable".to_string())
        }
        Weekday::Thu => clauses.push("Jeudi: fin de semaine proche".to_string()),
        Weekday::Fri => clauses.push("Vendredi: veille de week-end".to_string()),
        _ => {}
    }

    join(clauses)
}

pub(crate) fn multi_day(
    mode: ScoringMode,
    candidate: &Candidate,
    ctx: &DayContext,
    span_conflict_week: Option<NaiveDate>,
) -> String {
    let mut clauses: Vec<String> = Vec::new();

    clauses.push(format!(
        "PRS multi-jours du {} au {}",
        candidate.start.format("%d/%m"),
        candidate.end.format("%d/%m")
    ));

    if let Some(monday) = span_conflict_week {
        clauses.push(format!(
            "Charge secteur sur la semaine du {}",
            monday.format("%d/%m")
        ));
    } else if mode == ScoringMode::Sectored && ctx.sector_known {
        clauses.push("Secteur libre sur toute la période".to_string());
    }

    if let Some(name) = &ctx.prev_day_holiday {
        clauses.push(format!("Lendemain d'un jour férié ({})", name));
    }

    match ctx.weekday {
        Weekday::Mon => clauses.push("Démarrage lundi: semaine complète".to_string()),
        Weekday::Tue | Weekday::Wed => clauses.push("Démarrage en début de semaine".to_string()),
        Weekday::Thu | Weekday::Fri => clauses.push("Démarrage en fin de semaine".to_string()),
        _ => {}
    }

    if candidate.end.weekday() == Weekday::Fri && candidate.end.hour() > 13 {
        clauses.push("Se termine vendredi en fin de journée".to_string());
    }

    join(clauses)
}

fn join(clauses: Vec<String>) -> String {
    if clauses.is_empty() {
        FALLBACK.to_string()
    } else {
        clauses.join(SEPARATOR)
    }
}
