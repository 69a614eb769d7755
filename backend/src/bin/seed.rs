//! Seed the catalog with sample courses.
//!
//! Idempotent: a course whose code already exists is skipped, so the binary
//! can run on every deploy.

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use registrar::domain::ports::Catalog;
use registrar::domain::{CatalogService, CourseDraft, ErrorCode};
use registrar::outbound::persistence::{DbPool, DieselCourseRepository, PoolConfig};

/// (code, title, description, instructor, credits)
const SAMPLE_COURSES: [(&str, &str, &str, &str, i16); 10] = [
    (
        "CS101",
        "C Programming",
        "Learn the fundamentals of C programming language including variables, data types, control structures, functions, pointers, arrays, and file handling. Perfect for beginners.",
        "Prof. John Smith",
        3,
    ),
    (
        "CS102",
        "Python Programming",
        "Master Python programming from basics to advanced concepts. Cover syntax, data structures, OOP, file handling, and popular libraries like NumPy and pandas.",
        "Dr. Sarah Wilson",
        3,
    ),
    (
        "CS103",
        "Java Programming",
        "Complete Java programming course covering OOP principles, inheritance, polymorphism, exception handling, collections framework, and multithreading.",
        "Prof. Michael Brown",
        4,
    ),
    (
        "WEB101",
        "Web Development",
        "Learn to build modern websites using HTML, CSS, JavaScript, and responsive design. Create interactive web pages and understand web development fundamentals.",
        "Dr. Emily Davis",
        3,
    ),
    (
        "CS201",
        "Data Structures and Algorithms",
        "Study essential data structures like arrays, linked lists, stacks, queues, trees, and graphs. Learn sorting, searching algorithms and problem-solving techniques.",
        "Prof. Robert Johnson",
        4,
    ),
    (
        "DB101",
        "Database Management",
        "Introduction to databases, SQL queries, database design, normalization, and basic operations with MySQL and PostgreSQL.",
        "Dr. Lisa Anderson",
        3,
    ),
    (
        "WEB201",
        "Full Stack Development",
        "Build complete web applications end to end. Learn both frontend and backend development against a relational store.",
        "Prof. David Lee",
        4,
    ),
    (
        "CS104",
        "JavaScript Programming",
        "Master JavaScript including ES6+ features, DOM manipulation, async programming, and modern JavaScript frameworks and tools.",
        "Dr. Jennifer Martinez",
        3,
    ),
    (
        "CS301",
        "Object-Oriented Programming",
        "Deep dive into OOP concepts including classes, objects, inheritance, polymorphism, encapsulation, and design patterns.",
        "Prof. Thomas White",
        3,
    ),
    (
        "CS105",
        "C++ Programming",
        "Learn C++ programming including advanced features like templates, STL, memory management, and modern C++ standards.",
        "Dr. Amanda Garcia",
        3,
    ),
];

#[derive(Parser)]
#[command(about = "Insert the sample course catalog")]
struct Args {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();

    let args = Args::parse();
    let pool = DbPool::new(PoolConfig::new(&args.database_url))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let catalog = CatalogService::new(Arc::new(DieselCourseRepository::new(pool)));

    let mut seeded = 0usize;
    for (code, title, description, instructor, credits) in SAMPLE_COURSES {
        let draft =
            CourseDraft::try_from_parts(code, title, description, Some(instructor), Some(credits))
                .map_err(|err| std::io::Error::other(format!("invalid sample course: {err}")))?;
        match catalog.create_course(draft).await {
            Ok(_) => {
                seeded += 1;
                info!(code, "seeded course");
            }
            Err(err) if err.code == ErrorCode::Conflict => {
                info!(code, "course already present, skipping");
            }
            Err(err) => return Err(std::io::Error::other(err.to_string())),
        }
    }

    info!(seeded, total = SAMPLE_COURSES.len(), "seeding complete");
    Ok(())
}
