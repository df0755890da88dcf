//! Benchmarks for disassembly performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rvdump_disasm::{discover_branch_targets, Disassembler, LabelTable, RiscVDisassembler};

/// Sample RV32IM code: a small counting loop with a call and a return.
/// This is a realistic mix of arithmetic, memory, and control flow.
const RISCV_CODE: &[u32] = &[
    // Function prologue
    0xff01_0113, // addi sp, sp, -16
    0x0011_2623, // sw ra, 12(sp)
    0x0081_2423, // sw s0, 8(sp)
    // Loop setup
    0x0000_0413, // addi s0, zero, 0
    0x00a0_0293, // addi t0, zero, 10
    // .L0: loop body
    0x0014_0413, // addi s0, s0, 1
    0x0284_0333, // mul t1, s0, s0
    0xfe54_1ce3, // bne s0, t0, .L0
    // Call and epilogue
    0x0000_0517, // auipc a0, 0
    0x0005_00e7, // jalr ra, 0(a0)
    0x00c1_2083, // lw ra, 12(sp)
    0x0081_2403, // lw s0, 8(sp)
    0x0101_0113, // addi sp, sp, 16
    0x0000_8067, // jalr zero, 0(ra)
];

/// Larger code block for throughput testing (repeated pattern).
fn generate_large_block(words: usize) -> Vec<u32> {
    RISCV_CODE.iter().copied().cycle().take(words).collect()
}

fn bench_riscv_disassembly(c: &mut Criterion) {
    let disasm = RiscVDisassembler::new();

    let mut group = c.benchmark_group("riscv_disassembly");

    // Benchmark single instruction decode
    group.bench_function("single_instruction", |b| {
        b.iter(|| {
            let _ = disasm.decode(black_box(RISCV_CODE[0]), 0x1_0000);
        })
    });

    // Benchmark small function
    group.bench_function("small_function", |b| {
        b.iter(|| {
            let _ = disasm.disassemble_block(black_box(RISCV_CODE), 0x1_0000);
        })
    });

    // Benchmark various sizes for throughput
    for words in [256, 1024, 4096, 16384] {
        let code = generate_large_block(words);
        group.throughput(Throughput::Bytes((words * 4) as u64));
        group.bench_with_input(BenchmarkId::new("throughput", words), &code, |b, code| {
            b.iter(|| {
                let _ = disasm.disassemble_block(black_box(code), 0x1_0000);
            })
        });
    }

    group.finish();
}

fn bench_label_prepass(c: &mut Criterion) {
    let mut group = c.benchmark_group("label_prepass");

    for words in [1024, 16384] {
        let code = generate_large_block(words);
        group.throughput(Throughput::Bytes((words * 4) as u64));
        group.bench_with_input(BenchmarkId::new("discover", words), &code, |b, code| {
            b.iter(|| discover_branch_targets(black_box(code), 0x1_0000, LabelTable::new()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_riscv_disassembly, bench_label_prepass);
criterion_main!(benches);
