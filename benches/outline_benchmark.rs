//! Benchmarks for docspan outline inference.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic report pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docspan::{LineRun, OutlineOptions, PageText, Rect, TextBlock};

fn heading(size: f32, top: f32, text: &str) -> TextBlock {
    let width = text.chars().count() as f32 * size;
    let x0 = (595.0 - width) / 2.0;
    TextBlock::new(
        Rect::new(x0, top, x0 + width, top + size + 2.0),
        vec![LineRun::new(x0, x0 + width, size, text)],
    )
}

fn body(top: f32) -> TextBlock {
    TextBlock::new(
        Rect::new(90.0, top, 505.0, top + 400.0),
        vec![LineRun::new(90.0, 505.0, 9.0, "文".repeat(400))],
    )
}

/// Creates a synthetic report with a chapter every five pages and a
/// numbered subsection on every page.
fn create_report(page_count: u32) -> Vec<PageText> {
    let numerals = ["一", "二", "三", "四", "五", "六", "七", "八", "九", "十"];

    let mut pages = vec![PageText::new(
        1,
        595.0,
        vec![heading(22.0, 300.0, "基准测试年度报告")],
    )];
    for n in 2..=page_count {
        let mut blocks = Vec::new();
        if n % 5 == 2 {
            let chapter = numerals[((n / 5) % 10) as usize];
            blocks.push(heading(16.0, 80.0, &format!("第{chapter}节 经营情况")));
        }
        let sub = numerals[(n % 10) as usize];
        blocks.push(heading(12.0, 130.0, &format!("{sub}、业务分析")));
        blocks.push(body(160.0));
        pages.push(PageText::new(n, 595.0, blocks));
    }
    pages
}

/// Benchmark title signature classification.
fn bench_classification(c: &mut Criterion) {
    let titles = [
        "第一节 重要提示",
        "（一）主营业务分析",
        "1、概述",
        "一、经营情况讨论与分析",
        "普通正文内容没有任何编号",
    ];

    c.bench_function("classify_titles", |b| {
        b.iter(|| {
            for title in &titles {
                let _ = docspan::signature::classify(black_box(title));
            }
        });
    });
}

/// Benchmark outline inference at various document sizes.
fn bench_outline_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_outline");
    let options = OutlineOptions::default();

    for page_count in [10, 50, 200].iter() {
        let pages = create_report(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                docspan::build_outline_with_title("基准测试", black_box(&pages), &options).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark target resolution against a built outline.
fn bench_target_resolution(c: &mut Criterion) {
    let pages = create_report(200);
    let options = OutlineOptions::default();
    let tree = docspan::build_outline_with_title("基准测试", &pages, &options).unwrap();
    let schema = docspan::TargetSchema::from_json_str(
        r#"[
        {"name": "第一节 经营情况", "children": [{"name": "三、业务分析"}]},
        {"name": "第二节 经营情况"},
        {"name": "第十节 不存在"}
    ]"#,
    )
    .unwrap();

    c.bench_function("resolve_targets", |b| {
        b.iter(|| docspan::resolve_targets(black_box(&schema), black_box(&tree)));
    });
}

criterion_group!(
    benches,
    bench_classification,
    bench_outline_building,
    bench_target_resolution,
);
criterion_main!(benches);
