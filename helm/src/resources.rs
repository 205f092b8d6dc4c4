// Copyright (c) The Appstore Authors. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;

/// Parsed resource listing: section title to a list of row maps.
pub type ResourceTable = BTreeMap<String, Vec<BTreeMap<String, String>>>;

/// Parses the package manager's human-readable resource listing into a map.
///
/// The raw status text looks like:
///
/// ```text
/// ==> v1/Service
/// NAME                CLUSTER-IP  EXTERNAL-IP  PORT(S)   AGE
/// excited-newt-mysql  10.0.0.1    <none>       3306/TCP  8h
///
/// ==> v1beta1/Deployment
/// NAME                DESIRED  CURRENT  UP-TO-DATE  AVAILABLE  AGE
/// excited-newt-mysql  1        1        1           1          8h
/// ```
///
/// Sections are separated by blank lines; the first line of a section is
/// the title, the second the column headers, the rest the rows. Sections
/// without any rows are skipped, and a row shorter than the header row
/// only binds the columns it has.
pub fn parse_resources(raw: &str) -> ResourceTable {
    let mut parsed = ResourceTable::new();

    for section in raw.split("\n\n") {
        let lines: Vec<&str> = section.trim().lines().collect();
        if lines.len() <= 2 {
            continue;
        }

        let title = lines[0].trim_start_matches("==> ").to_string();
        let columns: Vec<String> = lines[1]
            .split_whitespace()
            .map(|c| c.to_lowercase())
            .collect();

        let rows = lines[2..]
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .cloned()
                    .zip(row.split_whitespace().map(str::to_string))
                    .collect::<BTreeMap<_, _>>()
            })
            .collect();

        parsed.insert(title, rows);
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "==> v1/Service\n\
NAME                CLUSTER-IP  EXTERNAL-IP  PORT(S)   AGE\n\
excited-newt-mysql  10.0.0.1    <none>       3306/TCP  8h\n\
\n\
==> v1beta1/Deployment\n\
NAME                DESIRED  CURRENT  UP-TO-DATE  AVAILABLE  AGE\n\
excited-newt-mysql  1        1        1           1          8h\n\
other-deployment    2        2        2           2          1d\n";

    #[test]
    fn test_parse_sections_and_rows() {
        let parsed = parse_resources(STATUS);

        assert_eq!(parsed.len(), 2);

        let services = &parsed["v1/Service"];
        assert_eq!(services.len(), 1);
        assert_eq!(services[0]["name"], "excited-newt-mysql");
        assert_eq!(services[0]["cluster-ip"], "10.0.0.1");
        assert_eq!(services[0]["port(s)"], "3306/TCP");

        let deployments = &parsed["v1beta1/Deployment"];
        assert_eq!(deployments.len(), 2);
        assert_eq!(deployments[1]["name"], "other-deployment");
        assert_eq!(deployments[1]["up-to-date"], "2");
    }

    #[test]
    fn test_headers_are_lowercased() {
        let parsed = parse_resources(STATUS);
        let row = &parsed["v1beta1/Deployment"][0];
        assert!(row.contains_key("desired"));
        assert!(!row.contains_key("DESIRED"));
    }

    #[test]
    fn test_short_rows_bind_leading_columns() {
        let raw = "==> v1/Secret\nNAME  TYPE  DATA  AGE\nmy-secret  Opaque\n";
        let parsed = parse_resources(raw);

        let row = &parsed["v1/Secret"][0];
        assert_eq!(row["name"], "my-secret");
        assert_eq!(row["type"], "Opaque");
        assert!(!row.contains_key("data"));
    }

    #[test]
    fn test_sections_without_rows_are_skipped() {
        let raw = "==> v1/Pod\nNAME  READY\n\n==> v1/Service\nNAME  AGE\nsvc-a  2m\n";
        let parsed = parse_resources(raw);

        assert!(!parsed.contains_key("v1/Pod"));
        assert!(parsed.contains_key("v1/Service"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_resources("").is_empty());
    }
}
