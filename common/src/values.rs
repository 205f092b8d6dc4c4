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

use serde_json::map::Entry;
use serde_json::{Map, Value};

/// An arbitrary chart values map, as posted by end users.
pub type ValuesMap = Map<String, Value>;

/// Merges `src` into `dest`, preferring values from `src`.
///
/// Maps are merged recursively; any other value kind in `src` replaces the
/// destination entry outright.
pub fn merge(dest: &mut ValuesMap, src: ValuesMap) {
    for (key, value) in src {
        match dest.entry(key) {
            Entry::Occupied(mut occupied) => match (occupied.get_mut(), value) {
                (Value::Object(existing), Value::Object(incoming)) => merge(existing, incoming),
                (slot, value) => *slot = value,
            },
            Entry::Vacant(vacant) => {
                vacant.insert(value);
            }
        }
    }
}

/// Looks up a nested entry by dotted path, e.g. `secrets.dataporten`.
pub fn get_path<'a>(values: &'a ValuesMap, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = values.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> ValuesMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_merge_prefers_source() {
        let mut dest = map(json!({"replicas": 1, "image": {"tag": "1.0", "pullPolicy": "Always"}}));
        let src = map(json!({"replicas": 3, "image": {"tag": "2.0"}}));

        merge(&mut dest, src);

        assert_eq!(dest["replicas"], json!(3));
        assert_eq!(dest["image"]["tag"], json!("2.0"));
        // untouched siblings survive a nested merge
        assert_eq!(dest["image"]["pullPolicy"], json!("Always"));
    }

    #[test]
    fn test_merge_replaces_non_map_values() {
        let mut dest = map(json!({"persistence": {"enabled": true}}));
        let src = map(json!({"persistence": false}));

        merge(&mut dest, src);

        assert_eq!(dest["persistence"], json!(false));
    }

    #[test]
    fn test_get_path() {
        let values = map(json!({"secrets": {"dataporten": {"name": "my-app"}}}));

        assert_eq!(
            get_path(&values, "secrets.dataporten.name"),
            Some(&json!("my-app"))
        );
        assert_eq!(get_path(&values, "secrets.missing"), None);
        assert_eq!(get_path(&values, "missing"), None);
    }
}
