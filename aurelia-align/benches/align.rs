use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use aurelia_align::{align_bounded, find_splice_sites, AlignmentScoring, GeneDirection};

fn random_dna(len: usize, seed: u64) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    // Deterministic pseudo-random for reproducibility
    let mut seq = Vec::with_capacity(len);
    let mut state: u64 = seed;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        seq.push(bases[((state >> 33) % 4) as usize]);
    }
    seq
}

/// Drop a GT..AG intron of the given length into the middle of an exonic
/// sequence, returning the genome and the intron-free EST.
fn spliced_pair(exon_len: usize, intron_len: usize) -> (Vec<u8>, Vec<u8>) {
    let left = random_dna(exon_len / 2, 42);
    let right = random_dna(exon_len - exon_len / 2, 137);
    let mut genome = left.clone();
    genome.extend_from_slice(b"GT");
    genome.extend(random_dna(intron_len.saturating_sub(4), 7));
    genome.extend_from_slice(b"AG");
    genome.extend_from_slice(&right);
    let mut est = left;
    est.extend_from_slice(&right);
    (genome, est)
}

fn bench_bounded(c: &mut Criterion) {
    let scoring = AlignmentScoring::dna_default();

    let mut group = c.benchmark_group("spliced");

    for &exon_len in &[100usize, 400] {
        let (genome, est) = spliced_pair(exon_len, 200);
        let mask = find_splice_sites(&genome, GeneDirection::Forward);

        group.bench_with_input(BenchmarkId::new("direct", exon_len), &exon_len, |b, _| {
            b.iter(|| {
                align_bounded(
                    black_box(&est),
                    black_box(&genome),
                    &scoring,
                    Some(&mask),
                    usize::MAX,
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("split", exon_len), &exon_len, |b, _| {
            b.iter(|| {
                align_bounded(
                    black_box(&est),
                    black_box(&genome),
                    &scoring,
                    Some(&mask),
                    0,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bounded);
criterion_main!(benches);
