use crate::calendar::parse_date;
use crate::model::{Group, Person, Roster};
use crate::scheduler::SchedError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Import du roster depuis un fichier `nom | groupe | d1, d2, ...`
pub fn import_roster<P: AsRef<Path>>(path: P) -> Result<Roster, SchedError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let file = File::open(path).map_err(|e| SchedError::InvalidFormat {
        origin: origin.clone(),
        line: 0,
        reason: e.to_string(),
    })?;
    parse_roster(file, &origin)
}

/// Parse un roster ; `origin` identifie la source dans les erreurs.
///
/// Les lignes vides, les commentaires `#` et les lignes sans `|` sont ignorés.
pub fn parse_roster<R: Read>(reader: R, origin: &str) -> Result<Roster, SchedError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut people = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(|e| SchedError::InvalidFormat {
            origin: origin.to_string(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;
        if rec.len() <= 1 {
            continue;
        }
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        let person = parse_person(&rec).map_err(|reason| SchedError::InvalidFormat {
            origin: origin.to_string(),
            line,
            reason,
        })?;
        people.push((line, person));
    }
    // noms vides ou en double : signalés avec la ligne du fichier
    Roster::from_lines(people, origin)
}

fn parse_person(rec: &StringRecord) -> Result<Person, String> {
    let name = rec.get(0).unwrap_or_default();
    let group = Group::new(rec.get(1).unwrap_or_default());
    let unavailable = rec
        .get(2)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| parse_date(raw).map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Person::new(name, group).with_unavailable(unavailable))
}
