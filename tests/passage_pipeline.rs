use std::collections::VecDeque;

use regex::Regex;

use raqim::engine::filter::is_practice_text;
use raqim::error::FetchError;
use raqim::generator::ExtractSource;
use raqim::generator::cleaning::RuleSet;
use raqim::generator::passage::PassageBuilder;

const SAMPLE_EXTRACTS: &[&str] = &[
    "القاهرة (بالقبطية: ⲕⲁϩⲓⲣⲏ) هي عاصمة جمهورية مصر العربية، وأكبر مدنها.",
    "يبلغ عدد سكانها 10 ملايين نسمة [1]. تأسست عام 969م على يد جوهر الصقلي.",
    "انظر أيضاً: الإسكندرية. مصادر إضافية. اللغة العربية لغة سامية.",
    "Paris is the capital of France.",
    "ﻻ تقلْ إنّ الشِّعرَ ماتَ ـــ فالقصيدةُ حيّةٌ!!! ههههه",
];

struct ScriptedSource {
    replies: VecDeque<Result<String, FetchError>>,
}

impl ScriptedSource {
    fn repeating(extract: &str, times: usize) -> Self {
        Self {
            replies: (0..times).map(|_| Ok(extract.to_string())).collect(),
        }
    }

    fn from_samples() -> Self {
        Self {
            replies: SAMPLE_EXTRACTS.iter().map(|s| Ok(s.to_string())).collect(),
        }
    }
}

impl ExtractSource for ScriptedSource {
    fn fetch_extract(&mut self) -> Result<String, FetchError> {
        self.replies.pop_front().unwrap_or(Err(FetchError::Exhausted))
    }
}

fn words(n: usize) -> String {
    vec!["نهر"; n].join(" ")
}

#[test]
fn half_threshold_holds_for_every_yield() {
    for desired in 1..=12 {
        for collected in 0..=desired + 2 {
            let mut builder = PassageBuilder::new(ScriptedSource::repeating(&words(collected), 1));
            let passage = builder.build(desired, 1);
            if collected * 2 < desired || collected == 0 {
                assert!(passage.is_empty(), "desired {desired}, collected {collected}");
            } else {
                assert_eq!(
                    passage.word_count(),
                    collected.min(desired),
                    "desired {desired}, collected {collected}"
                );
            }
        }
    }
}

#[test]
fn words_accumulate_across_attempts() {
    let mut builder = PassageBuilder::new(ScriptedSource::repeating(&words(2), 10));
    let passage = builder.build(7, 10);
    assert_eq!(passage.word_count(), 7);
}

#[test]
fn cleaned_samples_are_script_pure() {
    let pure = Regex::new(r"^[\p{Arabic} ]*$").unwrap();
    let rules = RuleSet::arabic();
    for sample in SAMPLE_EXTRACTS {
        let cleaned = rules.apply(sample);
        assert!(pure.is_match(&cleaned), "{sample:?} -> {cleaned:?}");
        assert!(cleaned.is_empty() || is_practice_text(&cleaned), "{cleaned:?}");
    }
}

#[test]
fn cleaning_is_idempotent_on_samples() {
    let rules = RuleSet::arabic();
    for sample in SAMPLE_EXTRACTS {
        let once = rules.apply(sample);
        assert_eq!(rules.apply(&once), once, "{sample:?}");
    }
}

#[test]
fn built_passage_from_samples_is_practice_text() {
    let mut builder = PassageBuilder::new(ScriptedSource::from_samples());
    let passage = builder.build(12, 15);
    assert!(!passage.is_empty());
    assert!(passage.word_count() <= 12);
    assert!(is_practice_text(&passage.text()));
    assert!(!passage.text().contains("انظر"));
}

#[test]
fn latin_only_source_fails() {
    let mut builder = PassageBuilder::new(ScriptedSource::repeating("Only Latin words here", 15));
    assert!(builder.build(5, 15).is_empty());
}
