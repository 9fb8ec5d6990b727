use std::path::PathBuf;
use std::time::Instant;

use bstr::ByteSlice;

use linemark::scanner::{reference, CountingSink, Parser};
use linemark::source::SourceBuffer;

const HELP: &str = "\
    linemark-bench - linemark throughput measurement

    USAGE:
        linemark-bench [--size MB] [--iterations N] [--dict PATH]

    OPTIONS:
        --size MB           Target synthetic document size in mebibytes. Defaults to 1024.
        --iterations N      Number of timed repetitions per measurement. Defaults to 5.
        --dict PATH         Path to a newline-separated word list used to synthesize the
                            document. Defaults to /usr/share/dict/words.
";

#[derive(Debug)]
struct BenchArgs {
    size_mb: u64,
    iterations: u32,
    dict: PathBuf,
}

// xorshift64; fast and deterministic, which keeps documents reproducible
// across runs and machines.
struct FastRandom {
    state: u64,
}

impl FastRandom {
    fn new(seed: u64) -> FastRandom {
        FastRandom { state: seed }
    }

    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn below(&mut self, max: u64) -> u64 {
        self.next() % max
    }
}

// Synthesizes prose-like indented text: lines of dictionary words under an
// indentation random walk (4 spaces per level, at most 10 levels, a step
// roughly every `lines_per_indent` lines).
fn generate_document(
    words: &[&[u8]],
    target_size: usize,
    words_per_line: u64,
    lines_per_indent: u64,
    seed: u64,
) -> Vec<u8> {
    let mut rng = FastRandom::new(seed);
    let mut doc = Vec::with_capacity(target_size + 1024);

    let mut indent = 0usize;
    let mut lines_at_indent = 0u64;

    while doc.len() < target_size {
        lines_at_indent += 1;
        if lines_at_indent >= lines_per_indent {
            match rng.below(3) {
                0 if indent > 0 => indent -= 1,
                1 if indent < 10 => indent += 1,
                _ => {}
            }
            lines_at_indent = 0;
        }

        doc.extend(std::iter::repeat(b' ').take(indent * 4));

        let words_this_line = 1 + rng.below(words_per_line * 2);
        for w in 0..words_this_line {
            if w > 0 {
                doc.push(b' ');
            }
            doc.extend_from_slice(words[rng.below(words.len() as u64) as usize]);
        }
        doc.push(b'\n');
    }
    doc
}

// Read-only memory bandwidth proxy: sum every byte so the load cannot be
// elided, without writing anything back.
fn sum_bytes(data: &[u8]) -> u64 {
    data.iter().map(|&b| b as u64).sum()
}

fn measure(len: usize, iterations: u32, mut work: impl FnMut() -> u64) -> f64 {
    // Warmup pass, untimed.
    std::hint::black_box(work());

    let start = Instant::now();
    for _ in 0..iterations {
        std::hint::black_box(work());
    }
    let elapsed = start.elapsed().as_secs_f64();
    (len as f64 * iterations as f64) / elapsed
}

fn print_throughput(label: &str, bytes_per_sec: f64, baseline: f64) {
    let gb = bytes_per_sec / (1024.0 * 1024.0 * 1024.0);
    if (bytes_per_sec - baseline).abs() < f64::EPSILON {
        println!("{label}{gb:.2} GB/s (baseline)");
    } else {
        println!("{label}{gb:.2} GB/s ({:.1}%)", bytes_per_sec / baseline * 100.0);
    }
}

fn main() {
    let args = match parse_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            std::process::exit(1);
        }
    };

    println!("=== linemark benchmark ===");
    println!();

    println!("Loading dictionary...");
    let dict = match SourceBuffer::new_from_file(&args.dict) {
        Ok(dict) => dict,
        Err(e) => {
            eprintln!("Error opening dictionary {}: {}", args.dict.display(), e);
            std::process::exit(1);
        }
    };
    let words: Vec<&[u8]> = dict.bytes().lines().filter(|word| !word.is_empty()).collect();
    if words.is_empty() {
        eprintln!("Error: dictionary {} contains no words", args.dict.display());
        std::process::exit(1);
    }
    println!("Loaded {} words", words.len());
    println!();

    println!("Generating {} MB document...", args.size_mb);
    let target_size = (args.size_mb as usize) * 1024 * 1024;
    let doc = generate_document(&words, target_size, 8, 5, 42);
    println!("Generated {} bytes", doc.len());
    println!();

    let buf = SourceBuffer::new_from_bytes(&doc);
    let iterations = args.iterations;

    println!("Running benchmarks ({iterations} iterations each)...");
    println!();

    let read_tp = measure(doc.len(), iterations, || sum_bytes(&doc));
    let newline_tp =
        measure(doc.len(), iterations, || memchr::memchr_iter(b'\n', &doc).count() as u64);

    let mut reference_sink = CountingSink::default();
    let reference_tp = measure(doc.len(), iterations, || {
        reference_sink.reset();
        reference::parse(buf.bytes(), &mut reference_sink);
        reference_sink.counts().eol
    });

    let mut parser = Parser::new(CountingSink::default());
    let parser_tp = measure(doc.len(), iterations, || {
        parser.reset();
        parser.parse(&buf);
        parser.counts().eol
    });

    println!("=== Results ===");
    println!();
    print_throughput("Memory read bandwidth: ", read_tp, read_tp);
    print_throughput("Newline scan:          ", newline_tp, read_tp);
    print_throughput("Reference parser:      ", reference_tp, read_tp);
    print_throughput("Chunked parser:        ", parser_tp, read_tp);
    println!();

    let mut reference_counts = CountingSink::default();
    reference::parse(buf.bytes(), &mut reference_counts);
    parser.reset();
    parser.parse(&buf);

    println!(
        "Reference counts: eol={} bos={}",
        reference_counts.counts().eol,
        reference_counts.counts().bos
    );
    println!("Chunked counts:   eol={} bos={}", parser.counts().eol, parser.counts().bos);

    if reference_counts.counts() == parser.counts() {
        println!("Counts MATCH!");
    } else {
        println!("WARNING: Counts MISMATCH!");
    }
}

fn parse_args() -> Result<BenchArgs, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = BenchArgs {
        size_mb: pargs.opt_value_from_str("--size")?.unwrap_or(1024),
        iterations: pargs.opt_value_from_str("--iterations")?.unwrap_or(5),
        dict: pargs
            .opt_value_from_str("--dict")?
            .unwrap_or_else(|| PathBuf::from("/usr/share/dict/words")),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        eprintln!("Error: unused arguments left: {:?}.", remaining);
        std::process::exit(1);
    }
    Ok(args)
}
