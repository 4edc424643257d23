use std::collections::VecDeque;

use bindery_core::config::Strictness;
use bindery_core::dependency::Dependency;
use bindery_core::source::{DependencyNames, Source, SourceId};
use bindery_core::source_list::SourceList;
use bindery_resolver::source_map::SourceMap;
use bindery_util::errors::BinderyError;

/// A source whose discovery answers are scripted call by call.
#[derive(Debug, Default)]
struct Fake {
    label: String,
    script: VecDeque<Option<Vec<String>>>,
    known: Option<Vec<String>>,
    reveal: VecDeque<String>,
    unmet: Vec<String>,
    names_seen: Vec<Vec<String>>,
    checks: Vec<Vec<String>>,
}

impl Fake {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Self::default()
        }
    }

    fn respond(mut self, response: Option<&[&str]>) -> Self {
        self.script.push_back(response.map(names));
        self
    }

    fn known(mut self, found: &[&str]) -> Self {
        self.known = Some(names(found));
        self
    }

    fn reveal(mut self, later: &[&str]) -> Self {
        self.reveal = names(later).into();
        self
    }

    fn unmet(mut self, unmet: &[&str]) -> Self {
        self.unmet = names(unmet);
        self
    }

    fn discovery_calls(&self) -> usize {
        self.names_seen.len()
    }
}

impl Source for Fake {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn dependency_names_to_double_check(
        &mut self,
        names: &DependencyNames,
    ) -> Option<Vec<String>> {
        self.names_seen.push(names.as_slice().to_vec());
        match self.script.pop_front() {
            Some(response) => response,
            None => self.known.clone(),
        }
    }

    fn unmet_deps(&self) -> Vec<String> {
        self.unmet.clone()
    }

    fn double_check_for(&mut self, candidates: Vec<String>, _names: &DependencyNames) {
        self.checks.push(candidates);
        if let Some(next) = self.reveal.pop_front() {
            self.known.get_or_insert_with(Vec::new).push(next);
        }
    }
}

fn names(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

const D: SourceId = SourceId::DEFAULT;
const E: SourceId = SourceId::new(1);
const F: SourceId = SourceId::new(2);

fn lenient(sources: SourceList<Fake>, deps: Vec<Dependency>) -> SourceMap<Fake> {
    SourceMap::new(sources, deps, Strictness::Lenient).unwrap()
}

// ── direct requirements ─────────────────────────────────────────────

#[test]
fn direct_requirements_bind_declared_or_default_source() {
    let sources = SourceList::new(Fake::new("D")).with_source("e", Fake::new("E"));
    let mut map = lenient(
        sources,
        vec![
            Dependency::new("a"),
            Dependency::pinned("b", E),
            Dependency::new("c"),
        ],
    );

    let direct = map.direct_requirements().clone();
    assert_eq!(direct.len(), 3);
    assert_eq!(direct["a"], D);
    assert_eq!(direct["b"], E);
    assert_eq!(direct["c"], D);
    assert_eq!(map.dependency_names(D).unwrap().as_slice(), ["a", "c"]);
    assert_eq!(map.dependency_names(E).unwrap().as_slice(), ["b"]);
}

#[test]
fn direct_requirements_are_memoized() {
    let sources = SourceList::new(Fake::new("D"));
    let mut map = lenient(sources, vec![Dependency::new("a"), Dependency::new("b")]);

    let first = map.direct_requirements().clone();
    let second = map.direct_requirements().clone();
    assert_eq!(first, second);
    // Names are appended once, not once per call.
    assert_eq!(map.dependency_names(D).unwrap().as_slice(), ["a", "b"]);
}

#[test]
fn dependency_names_of_unknown_source_is_none() {
    let sources = SourceList::new(Fake::new("D")).with_source("e", Fake::new("E"));
    let mut map = lenient(sources, vec![Dependency::new("a")]);
    map.direct_requirements();

    assert!(map.dependency_names(E).unwrap().is_empty());
    assert!(map.dependency_names(SourceId::new(7)).is_none());
}

#[test]
fn later_declaration_of_same_name_wins() {
    let sources = SourceList::new(Fake::new("D"))
        .with_source("e", Fake::new("E"))
        .with_source("f", Fake::new("F"));
    let mut map = lenient(
        sources,
        vec![Dependency::pinned("a", E), Dependency::pinned("a", F)],
    );

    assert_eq!(map.direct_requirements()["a"], F);
    // Both sources were told about the name on the way.
    assert_eq!(map.dependency_names(E).unwrap().as_slice(), ["a"]);
    assert_eq!(map.dependency_names(F).unwrap().as_slice(), ["a"]);
}

#[test]
fn unknown_source_id_is_rejected() {
    let sources = SourceList::new(Fake::new("D"));
    let err = SourceMap::new(
        sources,
        vec![Dependency::pinned("a", SourceId::new(7))],
        Strictness::Lenient,
    )
    .unwrap_err();
    assert!(matches!(err, BinderyError::UnknownSource { .. }));
}

// ── pinned spec names ───────────────────────────────────────────────

#[test]
fn pinned_spec_names_skip_the_given_source() {
    let sources = SourceList::new(Fake::new("D")).with_source("e", Fake::new("E"));
    let mut map = lenient(
        sources,
        vec![Dependency::new("a"), Dependency::pinned("b", E)],
    );

    assert_eq!(map.pinned_spec_names(Some(E)), vec!["a"]);
    assert_eq!(map.pinned_spec_names(Some(D)), vec!["b"]);
    assert_eq!(map.pinned_spec_names(None), vec!["a", "b"]);
}

#[test]
fn pinned_spec_names_with_unused_source_are_all_keys() {
    let sources = SourceList::new(Fake::new("D"))
        .with_source("e", Fake::new("E"))
        .with_source("f", Fake::new("F"));
    let mut map = lenient(
        sources,
        vec![Dependency::new("a"), Dependency::pinned("b", E)],
    );

    let keys: Vec<String> = map.direct_requirements().keys().cloned().collect();
    assert_eq!(map.pinned_spec_names(Some(F)), keys);
}

// ── attribution resolver ────────────────────────────────────────────

#[test]
fn discovered_name_is_claimed_and_loop_runs_twice() {
    let sources = SourceList::new(Fake::new("D"))
        .with_source("e", Fake::new("E").respond(Some(&["b"])).respond(None));
    let mut map = lenient(sources, vec![Dependency::new("a")]);
    let mut warnings = Vec::new();

    let all = map.all_requirements(&mut warnings).unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all["a"], D);
    assert_eq!(all["b"], E);
    assert!(warnings.is_empty());
    let e = &map.sources()[E];
    assert_eq!(e.discovery_calls(), 2);
    assert_eq!(e.checks, vec![names(&["b"]), Vec::<String>::new()]);
    assert_eq!(map.dependency_names(E).unwrap().as_slice(), ["b"]);
}

#[test]
fn name_pinned_to_another_source_is_not_a_candidate() {
    // `b` is declared against the default source; E volunteering it is
    // filtered out before conflict detection.
    let sources = SourceList::new(Fake::new("D"))
        .with_source("e", Fake::new("E").respond(Some(&["b"])).respond(None));
    let mut map = lenient(sources, vec![Dependency::new("a"), Dependency::new("b")]);
    let mut warnings = Vec::new();

    let all = map.all_requirements(&mut warnings).unwrap();

    assert_eq!(all["b"], D);
    assert!(warnings.is_empty());
    assert_eq!(map.sources()[E].checks[0], Vec::<String>::new());
}

#[test]
fn source_rediscovering_its_own_names_is_not_a_conflict() {
    let sources = SourceList::new(Fake::new("D")).with_source(
        "e",
        Fake::new("E")
            .respond(Some(&["own", "extra"]))
            .respond(Some(&["own", "extra"])),
    );
    let mut map = lenient(sources, vec![Dependency::pinned("own", E)]);
    let mut warnings = Vec::new();

    let all = map.all_requirements(&mut warnings).unwrap();

    assert_eq!(all["own"], E);
    assert_eq!(all["extra"], E);
    assert!(warnings.is_empty());
    assert_eq!(map.sources()[E].discovery_calls(), 2);
}

#[test]
fn unmet_names_are_not_candidates() {
    let sources = SourceList::new(Fake::new("D")).with_source(
        "e",
        Fake::new("E").respond(Some(&["c", "d"])).unmet(&["c"]),
    );
    let mut map = lenient(sources, vec![]);
    let mut warnings = Vec::new();

    let all = map.all_requirements(&mut warnings).unwrap();

    assert!(!all.contains_key("c"));
    assert_eq!(all["d"], E);
    assert_eq!(map.sources()[E].checks[0], names(&["d"]));
}

#[test]
fn duplicate_discovered_names_are_collapsed() {
    let sources = SourceList::new(Fake::new("D"))
        .with_source("e", Fake::new("E").respond(Some(&["x", "y", "x"])));
    let mut map = lenient(sources, vec![]);

    map.all_requirements(&mut Vec::new()).unwrap();

    assert_eq!(map.sources()[E].checks[0], names(&["x", "y"]));
}

#[test]
fn ambiguity_in_lenient_mode_warns_and_keeps_first_claim() {
    let sources = SourceList::new(Fake::new("D"))
        .with_source(
            "e",
            Fake::new("registry at https://z.example").respond(Some(&["x"])),
        )
        .with_source(
            "f",
            Fake::new("registry at https://a.example").respond(Some(&["x"])),
        );
    let mut map = lenient(sources, vec![]);
    let mut warnings = Vec::new();

    let all = map.all_requirements(&mut warnings).unwrap();

    assert_eq!(all["x"], E);
    assert_eq!(
        warnings,
        vec![
            "Warning: The gem 'x' was found in multiple relevant sources.\n\
             \x20 * registry at https://a.example\n\
             \x20 * registry at https://z.example\n\
             You should add this gem to the source block for the source you wish it to be installed from."
                .to_string()
        ]
    );
    assert!(!map.dependency_names(F).unwrap().contains("x"));
}

#[test]
fn ambiguity_is_reported_once_per_name_and_source_pair() {
    let sources = SourceList::new(Fake::new("D"))
        .with_source("e", Fake::new("E").respond(Some(&["x"])))
        .with_source(
            "f",
            Fake::new("F")
                .respond(Some(&["x", "y"]))
                .respond(Some(&["x", "y", "z"]))
                .respond(Some(&["x", "y", "z"])),
        );
    let mut map = lenient(sources, vec![]);
    let mut warnings = Vec::new();

    let all = map.all_requirements(&mut warnings).unwrap();

    assert_eq!(warnings.len(), 1);
    assert_eq!(all["x"], E);
    assert_eq!(all["y"], F);
    assert_eq!(all["z"], F);
    assert_eq!(map.sources()[F].discovery_calls(), 3);
}

#[test]
fn ambiguity_in_strict_mode_is_a_security_error() {
    let sources = SourceList::new(Fake::new("D"))
        .with_source("e", Fake::new("E").respond(Some(&["x"])))
        .with_source("f", Fake::new("F").respond(Some(&["x"])));
    let mut map = SourceMap::new(sources, vec![], Strictness::Strict).unwrap();
    let mut warnings = Vec::new();

    let err = map.all_requirements(&mut warnings).unwrap_err();

    assert!(err.is_security());
    assert!(warnings.is_empty());
    assert_eq!(
        err.to_string(),
        "The gem 'x' was found in multiple relevant sources.\n  * E\n  * F\n\
         You must add this gem to the source block for the source you wish it to be installed from."
    );
    match err {
        BinderyError::AmbiguousSource { name, sources, .. } => {
            assert_eq!(name, "x");
            assert_eq!(sources, ["E".to_string(), "F".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    // Aborted before F's verification hook ran.
    assert!(map.sources()[F].checks.is_empty());
}

#[test]
fn fixpoint_runs_k_plus_one_passes() {
    let k = 4;
    let sources = SourceList::new(Fake::new("D")).with_source(
        "e",
        Fake::new("E").known(&["n1"]).reveal(&["n2", "n3", "n4"]),
    );
    let mut map = lenient(sources, vec![]);

    let all = map.all_requirements(&mut Vec::new()).unwrap();

    assert_eq!(all.len(), k);
    assert_eq!(map.sources()[E].discovery_calls(), k + 1);
    assert_eq!(map.sources()[E].checks.len(), k + 1);
    assert_eq!(
        map.dependency_names(E).unwrap().as_slice(),
        ["n1", "n2", "n3", "n4"]
    );
}

#[test]
fn hooks_see_the_accumulated_names() {
    let sources = SourceList::new(Fake::new("D"))
        .with_source("e", Fake::new("E").respond(Some(&["b"])).respond(None));
    let mut map = lenient(sources, vec![Dependency::pinned("a", E)]);

    map.all_requirements(&mut Vec::new()).unwrap();

    assert_eq!(
        map.sources()[E].names_seen,
        vec![names(&["a"]), names(&["a", "b"])]
    );
}

#[test]
fn default_source_is_never_iterated() {
    let sources = SourceList::new(Fake::new("D").respond(Some(&["zz"])))
        .with_source("e", Fake::new("E"));
    let mut map = lenient(sources, vec![]);

    let all = map.all_requirements(&mut Vec::new()).unwrap();

    assert!(!all.contains_key("zz"));
    assert_eq!(map.sources()[D].discovery_calls(), 0);
}

#[test]
fn unmet_names_go_to_the_default_source_once() {
    let sources = SourceList::new(Fake::new("D"))
        .with_source("e", Fake::new("E").unmet(&["u", "w"]))
        .with_source(
            "f",
            Fake::new("F")
                .respond(Some(&["w"]))
                .unmet(&["u", "v"]),
        );
    let mut map = lenient(sources, vec![]);

    let all = map.all_requirements(&mut Vec::new()).unwrap();

    assert_eq!(all["w"], F);
    assert_eq!(map.sources()[D].checks, vec![names(&["u", "v"])]);
    for id in [E, F] {
        assert!(map.sources()[id].checks.iter().all(|c| !c.contains(&"u".to_string())));
    }
}

#[test]
fn no_discovery_still_verifies_with_empty_list() {
    let sources = SourceList::new(Fake::new("D")).with_source("e", Fake::new("E"));
    let mut map = lenient(sources, vec![Dependency::new("a")]);

    let all = map.all_requirements(&mut Vec::new()).unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(map.sources()[E].checks, vec![Vec::<String>::new()]);
    assert_eq!(map.sources()[D].checks, vec![Vec::<String>::new()]);
}

#[test]
fn resolution_is_deterministic() {
    fn run() -> (Vec<(String, SourceId)>, Vec<String>) {
        let sources = SourceList::new(Fake::new("D"))
            .with_source("e", Fake::new("E").respond(Some(&["x", "p", "q"])))
            .with_source("f", Fake::new("F").respond(Some(&["q", "x", "r"])));
        let mut map = SourceMap::new(
            sources,
            vec![Dependency::new("a")],
            Strictness::Lenient,
        )
        .unwrap();
        let mut warnings = Vec::new();
        let all = map.all_requirements(&mut warnings).unwrap();
        (all.into_iter().collect(), warnings)
    }

    let (first_map, first_warnings) = run();
    let (second_map, second_warnings) = run();
    assert_eq!(first_map, second_map);
    assert_eq!(first_warnings, second_warnings);
    assert_eq!(first_warnings.len(), 2);
    assert!(first_warnings[0].contains("'q'"));
    assert!(first_warnings[1].contains("'x'"));
}

#[test]
fn all_requirements_is_recomputed_on_each_call() {
    let sources = SourceList::new(Fake::new("D"))
        .with_source("e", Fake::new("E").respond(Some(&["b"])).respond(None));
    let mut map = lenient(sources, vec![Dependency::new("a")]);

    let first = map.all_requirements(&mut Vec::new()).unwrap();
    let second = map.all_requirements(&mut Vec::new()).unwrap();

    // The script is exhausted, so the second run discovers nothing new.
    assert!(first.contains_key("b"));
    assert!(!second.contains_key("b"));
    assert_eq!(map.sources()[E].discovery_calls(), 3);
}
