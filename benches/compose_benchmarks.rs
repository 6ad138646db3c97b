// hmbuild - A build orchestrator for the Handmade Hero Win32 platform layer
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Performance benchmarks for command composition.
//!
//! Run with: cargo bench
//!
//! Results are saved to target/criterion/ with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hmbuild::env::parse_environment;
use hmbuild::flags::FlagSetRegistry;
use hmbuild::{Architecture, BuildConfiguration, CommandComposer, Variant};

// ============================================================================
// Compose Benchmarks
// ============================================================================

fn request(extras: usize) -> BuildConfiguration {
    BuildConfiguration::new(Architecture::X64, Variant::DevelopmentDebug)
        .with_output_name("game")
        .with_additional_files((0..extras).map(|i| format!("../src/extra_{}.cpp", i)))
        .with_additional_libraries((0..extras).map(|i| format!("extra_{}.lib", i)))
}

fn bench_compose(c: &mut Criterion) {
    let composer = CommandComposer::new(FlagSetRegistry::builtin(), "build");

    let mut group = c.benchmark_group("compose");
    for extras in [0usize, 16, 256] {
        let config = request(extras);
        group.bench_with_input(BenchmarkId::new("extras", extras), &config, |b, config| {
            b.iter(|| composer.compose(black_box(config)))
        });
    }
    group.finish();
}

// ============================================================================
// Environment Benchmarks
// ============================================================================

fn bench_parse_environment(c: &mut Criterion) {
    let dump: String = (0..200)
        .map(|i| format!("VARIABLE_{}=C:\\Program Files\\Tool{};C:\\Windows\r\n", i, i))
        .collect();

    c.bench_function("parse_environment", |b| {
        b.iter(|| parse_environment(black_box(&dump)))
    });
}

criterion_group!(benches, bench_compose, bench_parse_environment);
criterion_main!(benches);
