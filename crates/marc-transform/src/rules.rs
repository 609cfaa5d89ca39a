//! Rule engine for record cleanup.
//!
//! Rules are keyed by [`FieldCategory`] and run in table order against each
//! field, visiting fields in document order. Fields synthesized during the pass
//! (general notes, split extents, the placeholder extent) are collected and
//! appended once the pass is over, so no rule ever sees a field created in the
//! same pass. Field removals are also deferred to the end of the pass.

use std::fmt;

use tracing::debug;

use marc_model::{
    DataField, Field, FieldCategory, Record, RuleAction, SubfieldCode, TAG_GENERAL_NOTE,
    TAG_TITLE,
};

use crate::dates::{DateSignals, apply_date_signals};
use crate::extent::{placeholder_extent, split_extent};
use crate::punctuation::{
    strip_colons, strip_heading_period, strip_parentheses, strip_periods, strip_semicolon,
};

/// Source of term appended to 752/754 fields that lack one.
pub const DEFAULT_TERM_SOURCE: &str = "naf";

/// One entry of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Record level: append a placeholder 300 when the record has none.
    PlaceholderExtent,
    /// 1XX/6XX/7XX: trailing periods (keeping initials) and `$q` parentheses.
    HeadingPunctuation,
    /// 110: every trailing period.
    CorporateNamePeriods,
    /// 2XX: colons, periods, `$h` removal, `$k` relocation.
    TitleCleanup,
    /// 541: semicolons and periods.
    ProvenancePunctuation,
    /// 300: cleanup and splitting.
    ExtentCleanup,
    /// 008: `undated` / `fix circa date` on the following 245.
    DateInference,
    /// 752/754: default `$2`.
    TermSource,
    /// 656: drop when `$2` is missing.
    GenreFormSource,
}

impl Rule {
    /// Every rule, in execution order.
    pub const ALL: [Rule; 9] = [
        Rule::PlaceholderExtent,
        Rule::HeadingPunctuation,
        Rule::CorporateNamePeriods,
        Rule::TitleCleanup,
        Rule::ProvenancePunctuation,
        Rule::ExtentCleanup,
        Rule::DateInference,
        Rule::TermSource,
        Rule::GenreFormSource,
    ];

    /// Rules the import depends on. Engines always run them.
    pub const REQUIRED: [Rule; 3] = [
        Rule::PlaceholderExtent,
        Rule::TermSource,
        Rule::GenreFormSource,
    ];

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    /// Whether the rule runs against a field of this category.
    pub fn applies_to(&self, category: FieldCategory) -> bool {
        match self {
            Rule::PlaceholderExtent => false,
            Rule::HeadingPunctuation => category.is_heading(),
            Rule::CorporateNamePeriods => category == FieldCategory::CorporateName,
            Rule::TitleCleanup => category == FieldCategory::Title,
            Rule::ProvenancePunctuation => category == FieldCategory::Provenance,
            Rule::ExtentCleanup => category == FieldCategory::Extent,
            Rule::DateInference => category == FieldCategory::DateControl,
            Rule::TermSource => category == FieldCategory::SubjectSource,
            Rule::GenreFormSource => category == FieldCategory::GenreForm,
        }
    }

    pub fn tags(&self) -> &'static str {
        match self {
            Rule::PlaceholderExtent => "record",
            Rule::HeadingPunctuation => "1XX, 6XX, 7XX",
            Rule::CorporateNamePeriods => "110",
            Rule::TitleCleanup => "2XX",
            Rule::ProvenancePunctuation => "541",
            Rule::ExtentCleanup => "300",
            Rule::DateInference => "008 -> 245",
            Rule::TermSource => "752, 754",
            Rule::GenreFormSource => "656",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rule::PlaceholderExtent => "Append a placeholder 300 $a when no extent is present",
            Rule::HeadingPunctuation => {
                "Strip a trailing period unless it ends an initial; unwrap $q parentheses"
            }
            Rule::CorporateNamePeriods => "Strip trailing periods from every subfield",
            Rule::TitleCleanup => {
                "Strip colons from $a/$b and periods from $c/$f/$g; delete $h; move $k to a 500 note"
            }
            Rule::ProvenancePunctuation => "Strip semicolons from $a/$c and periods from $d",
            Rule::ExtentCleanup => {
                "Expand abbreviations, drop brackets and punctuation; split repeated and parenthetical extents"
            }
            Rule::DateInference => {
                "Add $f 'undated' or 'fix circa date' when the 008 dates are missing or uncertain"
            }
            Rule::TermSource => "Append $2 'naf' when the source of term is missing",
            Rule::GenreFormSource => "Delete the field when $2 is missing",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::PlaceholderExtent => "placeholder-extent",
            Rule::HeadingPunctuation => "heading-punctuation",
            Rule::CorporateNamePeriods => "corporate-name-periods",
            Rule::TitleCleanup => "title-cleanup",
            Rule::ProvenancePunctuation => "provenance-punctuation",
            Rule::ExtentCleanup => "extent-cleanup",
            Rule::DateInference => "date-inference",
            Rule::TermSource => "term-source",
            Rule::GenreFormSource => "genre-form-source",
        };
        write!(f, "{name}")
    }
}

/// Actions taken on one record, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub actions: Vec<RuleAction>,
}

impl TransformReport {
    pub fn count(&self, label: &str) -> usize {
        self.actions
            .iter()
            .filter(|action| action.label() == label)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Changes produced by the rules for a single field.
#[derive(Default)]
struct FieldEffects {
    appended: Vec<DataField>,
    remove: bool,
    actions: Vec<RuleAction>,
}

/// Ordered rule table applied to one record at a time.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: Vec<Rule>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Engine running every rule in [`Rule::ALL`].
    pub fn new() -> Self {
        Self {
            rules: Rule::ALL.to_vec(),
        }
    }

    /// Engine running the given rules plus every [`Rule::REQUIRED`] rule, in
    /// [`Rule::ALL`] order.
    pub fn with_rules(rules: &[Rule]) -> Self {
        Self::selecting(|rule| rules.contains(&rule))
    }

    /// Engine running every rule except the listed ones. Required rules stay.
    pub fn without(disabled: &[Rule]) -> Self {
        Self::selecting(|rule| !disabled.contains(&rule))
    }

    fn selecting(keep: impl Fn(Rule) -> bool) -> Self {
        Self {
            rules: Rule::ALL
                .into_iter()
                .filter(|rule| rule.is_required() || keep(*rule))
                .collect(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn enabled(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    /// Apply the rule table to a record in a single pass.
    pub fn apply(&self, record: &mut Record) -> TransformReport {
        let mut report = TransformReport::default();
        let mut appended: Vec<DataField> = Vec::new();

        if self.enabled(Rule::PlaceholderExtent) && !record.has_category(FieldCategory::Extent) {
            debug!("adding placeholder extent");
            appended.push(placeholder_extent());
            report.actions.push(RuleAction::PlaceholderExtent);
        }

        let visited = record.fields.len();
        let mut removed = vec![false; visited];
        for index in 0..visited {
            let (head, following) = record.fields.split_at_mut(index + 1);
            let field = &mut head[index];
            let category = field.category();
            let mut effects = FieldEffects::default();
            for rule in self.rules.iter().filter(|rule| rule.applies_to(category)) {
                apply_rule(*rule, field, following, &mut effects);
                if effects.remove {
                    break;
                }
            }
            removed[index] = effects.remove;
            appended.extend(effects.appended);
            report.actions.extend(effects.actions);
        }

        if removed.iter().any(|flag| *flag) {
            let mut position = 0;
            record.fields.retain(|_| {
                let keep = position >= visited || !removed[position];
                position += 1;
                keep
            });
        }
        record
            .fields
            .extend(appended.into_iter().map(Field::Data));
        report
    }
}

fn apply_rule(rule: Rule, field: &mut Field, following: &mut [Field], effects: &mut FieldEffects) {
    match (rule, field) {
        (Rule::DateInference, Field::Control(control)) => {
            let signals = DateSignals::from_control(control);
            if signals.is_empty() {
                return;
            }
            for title in following
                .iter_mut()
                .filter_map(Field::as_data_mut)
                .filter(|data| data.tag == TAG_TITLE)
            {
                let actions = apply_date_signals(title, signals);
                for action in &actions {
                    debug!(%action, "inferred date expression");
                }
                effects.actions.extend(actions);
            }
        }
        (Rule::HeadingPunctuation, Field::Data(data)) => heading_punctuation(data),
        (Rule::CorporateNamePeriods, Field::Data(data)) => {
            for subfield in &mut data.subfields {
                subfield.value = strip_periods(&subfield.value).to_string();
            }
        }
        (Rule::TitleCleanup, Field::Data(data)) => title_cleanup(data, effects),
        (Rule::ProvenancePunctuation, Field::Data(data)) => provenance_punctuation(data),
        (Rule::ExtentCleanup, Field::Data(data)) => {
            let (split, actions) = split_extent(data);
            for action in &actions {
                debug!(%action, "split extent");
            }
            effects.appended.extend(split);
            effects.actions.extend(actions);
        }
        (Rule::TermSource, Field::Data(data)) => {
            if !data.has(SubfieldCode::Source) {
                debug!(tag = %data.tag, "adding source of term");
                data.push_subfield(SubfieldCode::Source, DEFAULT_TERM_SOURCE);
                effects.actions.push(RuleAction::SourceAdded {
                    tag: data.tag.clone(),
                });
            }
        }
        (Rule::GenreFormSource, Field::Data(data)) => {
            if !data.has(SubfieldCode::Source) {
                debug!(tag = %data.tag, "dropping field without source");
                effects.remove = true;
                effects.actions.push(RuleAction::FieldDropped {
                    tag: data.tag.clone(),
                });
            }
        }
        _ => {}
    }
}

fn heading_punctuation(field: &mut DataField) {
    for subfield in &mut field.subfields {
        subfield.value = strip_heading_period(&subfield.value).to_string();
        if subfield.code == SubfieldCode::Q {
            subfield.value = strip_parentheses(&subfield.value).to_string();
        }
    }
}

fn title_cleanup(field: &mut DataField, effects: &mut FieldEffects) {
    for subfield in &mut field.subfields {
        match subfield.code {
            SubfieldCode::A | SubfieldCode::B => {
                subfield.value = strip_colons(&subfield.value).to_string();
            }
            SubfieldCode::C | SubfieldCode::F | SubfieldCode::G => {
                subfield.value = strip_periods(&subfield.value).to_string();
            }
            _ => {}
        }
    }

    for subfield in field.subfields.iter().filter(|s| s.code == SubfieldCode::K) {
        effects.appended.push(
            DataField::new(TAG_GENERAL_NOTE).with_subfield(SubfieldCode::A, subfield.value.clone()),
        );
        effects.actions.push(RuleAction::TitlePartRelocated {
            value: subfield.value.clone(),
        });
    }
    if field.has(SubfieldCode::H) {
        effects.actions.push(RuleAction::MaterialDesignationRemoved {
            tag: field.tag.clone(),
        });
    }
    field
        .subfields
        .retain(|subfield| !matches!(subfield.code, SubfieldCode::H | SubfieldCode::K));
}

fn provenance_punctuation(field: &mut DataField) {
    for subfield in &mut field.subfields {
        match subfield.code {
            SubfieldCode::A | SubfieldCode::C => {
                subfield.value = strip_semicolon(&subfield.value).to_string();
            }
            SubfieldCode::D => {
                subfield.value = strip_periods(&subfield.value).to_string();
            }
            _ => {}
        }
    }
}
