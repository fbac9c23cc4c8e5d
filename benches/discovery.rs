use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;

use bumpkin::{Config, Detector};

/// Build `width` top-level packages, each with `width` nested modules and a
/// `node_modules` tree that discovery must prune.
fn generate_tree(width: usize) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for i in 0..width {
        let pkg = tmp.path().join(format!("pkg-{i:03}"));
        std::fs::create_dir_all(pkg.join("node_modules/dep")).unwrap();
        std::fs::write(pkg.join("node_modules/dep/.version"), "9.9.9\n").unwrap();
        std::fs::write(pkg.join(".version"), "1.0.0\n").unwrap();
        for j in 0..width {
            let nested = pkg.join(format!("sub-{j:03}"));
            std::fs::create_dir_all(&nested).unwrap();
            std::fs::write(nested.join(".version"), "0.1.0\n").unwrap();
        }
    }
    tmp
}

fn bench_discover(c: &mut Criterion) {
    let mut group = c.benchmark_group("discover");
    for width in [4usize, 16, 32] {
        let tree = generate_tree(width);
        let detector = Detector::new(Config::default());
        group.bench_with_input(BenchmarkId::from_parameter(width), &tree, |b, tree| {
            b.iter(|| detector.discover(black_box(tree.path())).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_discover);
criterion_main!(benches);
