use crate::algorithms::{self, numbers, SortAlgorithm};
use crate::arrays::{self, Matrix};
use crate::collections::{ArrayQueue, BoundedStack, LruCache};
use crate::concurrency;
use crate::config::DrillsConfig;
use crate::error::{DrillError, Result};
use crate::fileio;
use crate::patterns;
use crate::registry::{Account, Book, Employee, Library, Roster};
use crate::shapes::{
    self, AdjustedCalc, Animal, BasicCalc, Calculator, Cat, Circle, Dog, Drawable, Generic,
    Rectangle, Shape, Square,
};
use crate::text;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::fs;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Algorithms,
    Text,
    Collections,
    Concurrency,
    Registry,
    Modeling,
    Errors,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Algorithms => "algorithms",
            Category::Text => "text",
            Category::Collections => "collections",
            Category::Concurrency => "concurrency",
            Category::Registry => "registry",
            Category::Modeling => "modeling",
            Category::Errors => "errors",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, runnable exercise. `run` returns the lines a caller prints.
#[derive(Clone, Copy)]
pub struct Drill {
    pub name: &'static str,
    pub category: Category,
    pub summary: &'static str,
    pub run: fn(&DrillsConfig) -> Result<Vec<String>>,
}

impl fmt::Debug for Drill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drill")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

static CATALOG: &[Drill] = &[
    // Algorithms
    Drill {
        name: "binary-search",
        category: Category::Algorithms,
        summary: "Binary and linear search over a sorted array",
        run: binary_search_drill,
    },
    Drill {
        name: "sorting",
        category: Category::Algorithms,
        summary: "Every sort algorithm on the same shuffled input",
        run: sorting_drill,
    },
    Drill {
        name: "number-checks",
        category: Category::Algorithms,
        summary: "Prime, palindrome, Armstrong, perfect and leap-year checks",
        run: number_checks_drill,
    },
    Drill {
        name: "sequences",
        category: Category::Algorithms,
        summary: "Fibonacci series, primes, factorial, gcd, lcm and natural sums",
        run: sequences_drill,
    },
    Drill {
        name: "array-stats",
        category: Category::Algorithms,
        summary: "Second highest, median, duplicates and missing number",
        run: array_stats_drill,
    },
    Drill {
        name: "matrix",
        category: Category::Algorithms,
        summary: "Matrix addition, multiplication and transpose",
        run: matrix_drill,
    },
    Drill {
        name: "streams",
        category: Category::Algorithms,
        summary: "Iterator pipelines and a parallel word count",
        run: streams_drill,
    },
    Drill {
        name: "patterns",
        category: Category::Algorithms,
        summary: "Star, inverted, number and alphabet patterns plus a times table",
        run: patterns_drill,
    },
    // Text
    Drill {
        name: "string-reverse",
        category: Category::Text,
        summary: "Reverse characters and words",
        run: string_reverse_drill,
    },
    Drill {
        name: "palindrome",
        category: Category::Text,
        summary: "Palindrome strings and anagrams",
        run: palindrome_drill,
    },
    Drill {
        name: "balanced-brackets",
        category: Category::Text,
        summary: "Bracket matching with a stack",
        run: balanced_drill,
    },
    Drill {
        name: "char-stats",
        category: Category::Text,
        summary: "Character frequency, vowels, first unique character, word lengths",
        run: char_stats_drill,
    },
    Drill {
        name: "word-frequency",
        category: Category::Text,
        summary: "Word counts in first-seen order",
        run: word_frequency_drill,
    },
    Drill {
        name: "file-io",
        category: Category::Text,
        summary: "Write, read, copy and count words in a scratch file",
        run: file_io_drill,
    },
    // Collections
    Drill {
        name: "lru-cache",
        category: Category::Collections,
        summary: "Least-recently-used eviction",
        run: lru_drill,
    },
    Drill {
        name: "bounded-stack",
        category: Category::Collections,
        summary: "Array-backed stack with overflow and underflow",
        run: stack_drill,
    },
    Drill {
        name: "circular-queue",
        category: Category::Collections,
        summary: "Array-backed queue that wraps around",
        run: queue_drill,
    },
    // Concurrency
    Drill {
        name: "producer-consumer",
        category: Category::Concurrency,
        summary: "Bounded blocking queue between two threads",
        run: producer_consumer_drill,
    },
    Drill {
        name: "pipeline",
        category: Category::Concurrency,
        summary: "One producer, several consumers over a bounded channel",
        run: pipeline_drill,
    },
    Drill {
        name: "handoff",
        category: Category::Concurrency,
        summary: "Single-slot wait/notify exchange",
        run: handoff_drill,
    },
    Drill {
        name: "worker-pool",
        category: Category::Concurrency,
        summary: "Fixed pool of named worker threads",
        run: worker_pool_drill,
    },
    Drill {
        name: "lock-ordering",
        category: Category::Concurrency,
        summary: "Two threads taking two locks in opposite order without deadlock",
        run: lock_ordering_drill,
    },
    // Registry
    Drill {
        name: "library",
        category: Category::Registry,
        summary: "Issue and return books",
        run: library_drill,
    },
    Drill {
        name: "banking",
        category: Category::Registry,
        summary: "Deposit, withdraw and transfer between accounts",
        run: banking_drill,
    },
    Drill {
        name: "roster",
        category: Category::Registry,
        summary: "Employee records with lookup and JSON export",
        run: roster_drill,
    },
    // Modeling
    Drill {
        name: "shapes",
        category: Category::Modeling,
        summary: "Areas through a shape trait object",
        run: shapes_drill,
    },
    Drill {
        name: "traits",
        category: Category::Modeling,
        summary: "Default methods, overriding and dynamic dispatch",
        run: traits_drill,
    },
    // Errors
    Drill {
        name: "error-handling",
        category: Category::Errors,
        summary: "Division by zero, age checks, integer parsing and overflow",
        run: error_handling_drill,
    },
];

pub fn catalog() -> &'static [Drill] {
    CATALOG
}

pub fn find(name: &str) -> Result<&'static Drill> {
    CATALOG
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| DrillError::UnknownDrill(name.to_string()))
}

pub fn run(name: &str, config: &DrillsConfig) -> Result<Vec<String>> {
    let drill = find(name)?;
    info!(drill = drill.name, category = %drill.category, "running drill");
    (drill.run)(config)
}

/// Renders an outcome the drill expects to fail.
fn describe<T: fmt::Debug>(outcome: Result<T>) -> String {
    match outcome {
        Ok(value) => format!("unexpectedly succeeded with {value:?}"),
        Err(err) => err.to_string(),
    }
}

// =============================================================================
// Algorithms
// =============================================================================

fn binary_search_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let sorted = [2, 5, 8, 12, 16, 23, 38, 56, 72, 91];
    let show = |found: Option<usize>| found.map_or("not found".to_string(), |i| i.to_string());
    Ok(vec![
        format!("binary search 23: {}", show(algorithms::binary_search(&sorted, &23))),
        format!("binary search 7: {}", show(algorithms::binary_search(&sorted, &7))),
        format!("linear search 56: {}", show(algorithms::linear_search(&sorted, &56))),
    ])
}

fn sorting_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut input: Vec<i32> = (1..=10).collect();
    input.shuffle(&mut rng);

    let mut lines = vec![format!("input: {input:?}")];
    for algorithm in SortAlgorithm::ALL {
        let mut items = input.clone();
        algorithm.sort(&mut items);
        lines.push(format!("{}: {items:?}", algorithm.name()));
    }
    Ok(lines)
}

fn number_checks_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    Ok(vec![
        format!("is 29 prime: {}", numbers::is_prime(29)),
        format!("is 121 a palindrome: {}", numbers::is_palindrome_number(121)),
        format!("is 153 armstrong: {}", numbers::is_armstrong(153)),
        format!("is 28 perfect: {}", numbers::is_perfect_number(28)),
        format!("is 21 fibonacci: {}", numbers::is_fibonacci(21)),
        format!("is 2024 a leap year: {}", numbers::is_leap_year(2024)),
        format!("is 10 even: {}", numbers::is_even(10)),
        format!("sign of -4: {:?}", numbers::sign(-4)),
    ])
}

fn sequences_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let show = |v: Option<u64>| v.map_or("overflow".to_string(), |n| n.to_string());
    Ok(vec![
        format!("fibonacci(10): {:?}", numbers::fibonacci(10)),
        format!("primes up to 30: {:?}", numbers::primes_up_to(30)),
        format!("5!: {}", show(numbers::factorial(5))),
        format!("gcd(48, 18): {}", numbers::gcd(48, 18)),
        format!("lcm(4, 6): {}", show(numbers::lcm(4, 6))),
        format!("sum of digits 1234: {}", numbers::sum_of_digits(1234)),
        format!("sum of first 10 naturals: {}", show(numbers::sum_of_naturals(10))),
        format!(
            "reverse 1234: {}",
            numbers::reverse_integer(1234).map_or("overflow".to_string(), |n| n.to_string())
        ),
    ])
}

fn array_stats_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let values = [12, 35, 1, 10, 34, 1];
    let median = arrays::median(&values).map_or("none".to_string(), |m| m.to_string());
    Ok(vec![
        format!("second highest: {:?}", arrays::second_highest(&values)),
        format!("min/max: {:?}", arrays::min_max(&values)),
        format!("median: {median}"),
        format!("duplicates: {:?}", arrays::duplicates(&values)),
        format!("missing: {:?}", arrays::missing_number(&[1, 2, 4, 5, 6])),
        format!("common: {:?}", arrays::common_elements(&[1, 2, 3, 4], &[3, 4, 5])),
    ])
}

fn matrix_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let a = Matrix::from_rows(&[vec![1, 2], vec![3, 4]])?;
    let b = Matrix::from_rows(&[vec![5, 6], vec![7, 8]])?;
    Ok(vec![
        format!("sum: {:?}", a.add(&b)?.to_rows()),
        format!("product: {:?}", a.mul(&b)?.to_rows()),
        format!("transpose: {:?}", a.transpose().to_rows()),
    ])
}

fn streams_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let values = [1, 2, 3, 4, 5, 6];
    let lines: Vec<String> = ["the quick fox", "the lazy dog", "the end"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let top = arrays::parallel_word_frequency(&lines);
    Ok(vec![
        format!("doubled: {:?}", arrays::doubled(&values)?),
        format!("sum of squares of evens: {}", arrays::sum_squares_of_evens(&values)?),
        format!("sum: {}", arrays::sum(&values)?),
        format!("top word: {:?}", top.first()),
    ])
}

fn patterns_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let mut lines = patterns::star_triangle(3);
    lines.extend(patterns::number_triangle(3));
    lines.extend(patterns::pyramid(3));
    lines.extend(patterns::alphabet_triangle(3));
    lines.extend(patterns::inverted_star_triangle(3));
    lines.extend(patterns::multiplication_table(5, 3)?);
    Ok(lines)
}

// =============================================================================
// Text
// =============================================================================

fn string_reverse_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    Ok(vec![
        format!("reversed: {}", text::reverse_chars("hello")),
        format!("words reversed: {}", text::reverse_words("Rust is fun")),
    ])
}

fn palindrome_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    Ok(vec![
        format!("madam: {}", text::is_palindrome("madam")),
        format!("hello: {}", text::is_palindrome("hello")),
        format!("listen/silent anagram: {}", text::is_anagram("listen", "silent")),
    ])
}

fn balanced_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    Ok(vec![
        format!("{{[()]}}: {}", text::is_balanced("{[()]}")),
        format!("([)]: {}", text::is_balanced("([)]")),
    ])
}

fn char_stats_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let input = "programming";
    let sentence = "This is a Rust programming challenge";
    let (vowels, consonants) = text::count_vowels_consonants(input);
    Ok(vec![
        format!("duplicates: {:?}", text::duplicate_chars(input)),
        format!("first unique: {:?}", text::first_non_repeated_char(input)),
        format!("vowels: {vowels}, consonants: {consonants}"),
        format!("occurrences of 'g': {}", text::count_occurrences(input, 'g')),
        format!("longest word: {:?}", text::longest_word(sentence)),
        format!("shortest word: {:?}", text::shortest_word(sentence)),
    ])
}

fn word_frequency_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let counts = text::word_frequency("rust is fun and rust is fast");
    Ok(counts
        .iter()
        .map(|(word, count)| format!("{word}: {count}"))
        .collect())
}

fn file_io_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let dir = std::env::temp_dir().join(format!("drills-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir)?;

    let outcome = (|| -> Result<Vec<String>> {
        let input = dir.join("input.txt");
        let copy = dir.join("copy.txt");
        fileio::write_text(&input, "Hello file\n\nwritten by the drills runner\n")?;
        let bytes = fileio::copy_file(&input, &copy)?;
        Ok(vec![
            format!("lines: {:?}", fileio::read_lines(&copy)?),
            format!("copied bytes: {bytes}"),
            format!("words: {}", fileio::count_words(&input)?),
            format!("words in tree: {}", fileio::count_words_in_tree(&dir, "txt")?.total),
        ])
    })();

    fs::remove_dir_all(&dir)?;
    outcome
}

// =============================================================================
// Collections
// =============================================================================

fn lru_drill(config: &DrillsConfig) -> Result<Vec<String>> {
    let mut cache = LruCache::new(config.cache.capacity)?;
    cache.put(1, "A");
    cache.put(2, "B");
    cache.get(&1);
    cache.put(3, "C");
    let keys: Vec<i32> = cache.keys().copied().collect();
    Ok(vec![
        format!("keys: {keys:?}"),
        format!("hit rate: {:.2}", cache.stats().hit_rate()),
    ])
}

fn stack_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let mut stack = BoundedStack::new(3)?;
    for value in [10, 20, 30] {
        stack.push(value)?;
    }
    let overflow = describe(stack.push(40));
    let popped = stack.pop()?;
    Ok(vec![
        format!("popped: {popped}"),
        format!("peek: {:?}", stack.peek()),
        format!("push 40: {overflow}"),
    ])
}

fn queue_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let mut queue = ArrayQueue::new(3)?;
    for value in [1, 2, 3] {
        queue.enqueue(value)?;
    }
    let first = queue.dequeue()?;
    queue.enqueue(4)?;
    let mut drained = Vec::new();
    while let Ok(value) = queue.dequeue() {
        drained.push(value);
    }
    Ok(vec![
        format!("dequeued: {first}"),
        format!("after wraparound: {drained:?}"),
    ])
}

// =============================================================================
// Concurrency
// =============================================================================

fn producer_consumer_drill(config: &DrillsConfig) -> Result<Vec<String>> {
    let report = concurrency::produce_consume(config.queue.capacity, config.queue.items)?;
    Ok(vec![
        format!("consumed: {:?}", report.consumed),
        format!("peak queue length: {} of {}", report.peak_len, report.capacity),
    ])
}

fn pipeline_drill(config: &DrillsConfig) -> Result<Vec<String>> {
    let values = concurrency::pipeline(
        config.queue.capacity,
        config.queue.items,
        config.pool.workers,
    )?;
    Ok(vec![format!("received: {values:?}")])
}

fn handoff_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let received = concurrency::exchange(vec![1, 2, 3])?;
    Ok(vec![format!("handed off: {received:?}")])
}

fn worker_pool_drill(config: &DrillsConfig) -> Result<Vec<String>> {
    let results = concurrency::run_tasks(config.pool.workers, 4)?;
    Ok(results
        .into_iter()
        .map(|(task, worker)| format!("task {task} ran on {worker}"))
        .collect())
}

fn lock_ordering_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    Ok(concurrency::opposite_order_demo())
}

// =============================================================================
// Registry
// =============================================================================

fn library_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let mut library = Library::new();
    library.add(Book::new("101", "Rust Basics"))?;
    library.add(Book::new("102", "Data Structures"))?;
    library.issue("101")?;
    let second_issue = describe(library.issue("101"));

    let mut lines = library.list();
    lines.push(format!("issue again: {second_issue}"));
    library.return_book("101")?;
    lines.push(format!("available after return: {}", library.available().len()));
    Ok(lines)
}

fn banking_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let account = Account::new(1, 1000);
    account.deposit(500)?;
    let balance = account.withdraw(200)?;
    let overdraw = describe(account.withdraw(5_000));

    let savings = Account::new(2, 0);
    account.transfer(&savings, 300)?;
    Ok(vec![
        format!("balance: {balance}"),
        format!("withdraw 5000: {overdraw}"),
        format!("after transfer: {} / {}", account.balance(), savings.balance()),
    ])
}

fn roster_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let mut roster = Roster::new();
    roster.add(Employee::new(1, "Ana").with_department("Engineering"))?;
    roster.add(Employee::new(2, "Bob"))?;
    let missing = describe(roster.remove(&9));

    let mut lines: Vec<String> = roster
        .iter()
        .map(|e| format!("{} {}", e.id, e.name))
        .collect();
    lines.push(format!("remove 9: {missing}"));
    lines.push(format!("json bytes: {}", roster.to_json()?.len()));
    Ok(lines)
}

// =============================================================================
// Modeling
// =============================================================================

fn shapes_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(Circle::new(2.0)),
        Box::new(Rectangle::new(2.0, 3.0)),
        Box::new(Square::new(4.0)),
    ];
    let mut lines: Vec<String> = shapes
        .iter()
        .map(|s| format!("{} area: {:.2}", s.name(), s.area()))
        .collect();
    lines.push(format!("total area: {:.2}", shapes::total_area(&shapes)));
    Ok(lines)
}

fn traits_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let animals: Vec<Box<dyn Animal>> = vec![Box::new(Dog), Box::new(Cat), Box::new(Generic)];
    let mut lines: Vec<String> = animals.iter().map(|a| a.sound().to_string()).collect();
    lines.push(Square::new(1.0).draw());
    lines.push(Circle::new(1.5).draw());
    lines.push(format!("basic add3: {}", BasicCalc.add3(1, 2, 3)));
    lines.push(format!("adjusted add3: {}", AdjustedCalc.add3(1, 2, 3)));
    Ok(lines)
}

// =============================================================================
// Errors
// =============================================================================

fn error_handling_drill(_: &DrillsConfig) -> Result<Vec<String>> {
    let show = |outcome: Result<String>| match outcome {
        Ok(value) => value,
        Err(err) => format!("error: {err}"),
    };
    Ok(vec![
        show(numbers::divide(10, 2).map(|q| format!("10 / 2 = {q}"))),
        show(numbers::divide(10, 0).map(|q| format!("10 / 0 = {q}"))),
        show(numbers::check_voting_age(21).map(|_| "age 21 may vote".to_string())),
        show(numbers::check_voting_age(16).map(|_| "age 16 may vote".to_string())),
        show(text::parse_int("42").map(|n| format!("parsed {n}"))),
        show(text::parse_int("abc").map(|n| format!("parsed {n}"))),
        show(arrays::sum(&[i64::MAX, 1]).map(|n| format!("sum {n}"))),
    ])
}
