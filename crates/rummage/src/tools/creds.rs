//! Reformat `["user","pass"]` lines into CSV.

const HEADER: &str = "username,password\n";

/// Convert JSON-lines style credential pairs into a `username,password` CSV.
///
/// Each line is stripped of surrounding `[`, `"` and `]` characters and split
/// on `","`. Lines that do not split into exactly two fields are dropped.
pub fn credentials_to_csv(input: &str) -> String {
    let mut csv = String::from(HEADER);

    for line in input.lines() {
        let trimmed = line.trim_matches(|c| matches!(c, '[' | '"' | ']'));
        let fields: Vec<&str> = trimmed.split("\",\"").collect();
        if let [user, pass] = fields.as_slice() {
            csv.push_str(user);
            csv.push(',');
            csv.push_str(pass);
            csv.push('\n');
        }
    }

    csv
}
