use criterion::{Criterion, black_box, criterion_group, criterion_main};

use raqim::engine::normalize::chars_match;
use raqim::generator::cleaning::RuleSet;
use raqim::generator::passage::Passage;
use raqim::session::typing::Session;

const EXTRACT: &str = "القاهرة (بالقبطية: ⲕⲁϩⲓⲣⲏ) هي عاصمة جمهورية مصر العربية، وأكبر مدنها. \
يبلغ عدد سكانها 10 ملايين نسمة [1]. تأسست عام 969م على يد جوهر الصقلي. \
انظر أيضاً: الإسكندرية، الجيزة. مصادر إضافية ووصلات خارجية. ";

fn make_extract(repeats: usize) -> String {
    EXTRACT.repeat(repeats)
}

fn bench_cleaning(c: &mut Criterion) {
    let rules = RuleSet::arabic();
    let small = make_extract(1);
    let large = make_extract(40);

    c.bench_function("RuleSet::arabic apply (1 extract)", |b| {
        b.iter(|| rules.apply(black_box(&small)))
    });

    c.bench_function("RuleSet::arabic apply (40 extracts)", |b| {
        b.iter(|| rules.apply(black_box(&large)))
    });
}

fn bench_typing(c: &mut Criterion) {
    let text = RuleSet::arabic().apply(&make_extract(10));
    let passage = Passage::new(&text);
    let typed: Vec<String> = text
        .char_indices()
        .map(|(idx, ch)| text[..idx + ch.len_utf8()].to_string())
        .collect();

    c.bench_function("Session full passage typed incrementally", |b| {
        b.iter(|| {
            let mut session = Session::start(passage.clone());
            for prefix in &typed {
                session.on_input(black_box(prefix));
            }
            session.stats()
        })
    });

    c.bench_function("chars_match over passage", |b| {
        b.iter(|| {
            text.chars()
                .filter(|&ch| chars_match(black_box(ch), black_box('ا')))
                .count()
        })
    });
}

criterion_group!(benches, bench_cleaning, bench_typing);
criterion_main!(benches);
