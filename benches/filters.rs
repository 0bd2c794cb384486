use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pdf_graph::filter::{FilterChain, FilterKind, FilterParams};
use pdf_graph::lexer::Cursor;
use pdf_graph::{from_slice, to_vec, CountedTree, Dictionary, ObjectGraph, Options};

fn sample_data() -> Vec<u8> {
    b"0123456789".repeat(1024)
}

fn benchmark_codecs(c: &mut Criterion) {
    let data = sample_data();
    let options = Options::default();
    let mut group = c.benchmark_group("codecs");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for kind in [
        FilterKind::Flate,
        FilterKind::Lzw,
        FilterKind::AsciiHex,
        FilterKind::Ascii85,
        FilterKind::RunLength,
    ] {
        let chain = FilterChain::new().with(kind, FilterParams::default());
        let raw = chain.encode(&data).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", kind), &data, |b, data| {
            b.iter(|| chain.encode(black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("decode", kind), &raw, |b, raw| {
            b.iter(|| chain.decode(black_box(raw), &options))
        });
    }

    group.finish();
}

fn benchmark_predictors(c: &mut Criterion) {
    let data = sample_data();
    let options = Options::default();
    let mut group = c.benchmark_group("predictors");
    group.throughput(Throughput::Bytes(data.len() as u64));

    for predictor in [2u8, 10, 11, 12, 13, 14, 15] {
        let params = FilterParams::default()
            .with_predictor(predictor)
            .with_columns(80);
        let chain = FilterChain::new().with(FilterKind::Flate, params);
        let raw = chain.encode(&data).unwrap();

        group.bench_with_input(BenchmarkId::new("encode", predictor), &data, |b, data| {
            b.iter(|| chain.encode(black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("decode", predictor), &raw, |b, raw| {
            b.iter(|| chain.decode(black_box(raw), &options))
        });
    }

    group.finish();
}

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let page = b"<< /Type /Page /Parent 3 0 R /MediaBox [0 0 612 792] \
        /Resources << /Font << /F1 7 0 R /F2 8 0 R >> >> /Contents 9 0 R /Rotate 90 >>";
    group.bench_function("page_dictionary", |b| b.iter(|| from_slice(black_box(page))));

    let numbers: Vec<u8> = (0..500)
        .map(|i| format!("{} {}.{} ", i, i, i % 7))
        .collect::<String>()
        .into_bytes();
    let array = [b"[".as_slice(), numbers.as_slice(), b"]".as_slice()].concat();
    group.bench_function("number_array", |b| b.iter(|| from_slice(black_box(&array))));

    let objects: Vec<u8> = (1..=200)
        .map(|i| format!("{i} 0 obj\n<< /Type /Page /Parent 1 0 R /Index {i} >>\nendobj\n"))
        .collect::<String>()
        .into_bytes();
    group.bench_function("indirect_objects", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(&objects));
            let mut count = 0;
            while cursor.parse_indirect_object().is_ok() {
                count += 1;
            }
            count
        })
    });

    let value = from_slice(page).unwrap();
    group.bench_function("serialize_page", |b| b.iter(|| to_vec(black_box(&value))));

    group.finish();
}

fn benchmark_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("counted_tree");

    for size in [100usize, 1000] {
        let mut graph = ObjectGraph::new();
        let mut tree = CountedTree::new(&mut graph);
        let root = tree.new_node().unwrap();
        let mut nodes = Vec::new();
        for _ in 0..size / 10 {
            let node = tree.new_node().unwrap();
            let leaves: Vec<_> = (0..10)
                .map(|_| tree.new_leaf(Dictionary::new()).unwrap())
                .collect();
            tree.append(node, &leaves).unwrap();
            nodes.push(node);
        }
        tree.append(root, &nodes).unwrap();

        group.bench_with_input(BenchmarkId::new("get", size), &size, |b, &size| {
            b.iter(|| tree.get(root, black_box(size / 2 + 1)))
        });
        group.bench_with_input(BenchmarkId::new("children", size), &size, |b, _| {
            b.iter(|| tree.children(black_box(root)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_codecs,
    benchmark_predictors,
    benchmark_parsing,
    benchmark_tree
);
criterion_main!(benches);
