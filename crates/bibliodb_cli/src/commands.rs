//! Subcommand definitions and their execution against a catalog session.

use anyhow::Result;
use bibliodb_core::{
    Author, Book, CatalogService, CatalogStorage, Loan, RecordId, ServiceError, StoreError,
    Student, DEFAULT_RANKING_TOP_N,
};
use clap::Subcommand;
use serde::Serialize;

#[derive(Subcommand)]
pub enum Command {
    /// Add an author.
    AddAuthor {
        #[arg(long)]
        id: RecordId,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        nationality: String,
    },
    /// Replace an author's name and nationality.
    UpdateAuthor {
        #[arg(long)]
        id: RecordId,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        nationality: String,
    },
    /// Delete an author no book refers to.
    DeleteAuthor {
        #[arg(long)]
        id: RecordId,
    },
    /// List authors.
    ListAuthors {
        #[arg(long)]
        json: bool,
    },
    /// Add a book by an existing author.
    AddBook {
        #[arg(long)]
        id: RecordId,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        isbn: String,
        #[arg(long, allow_negative_numbers = true)]
        year: i32,
        #[arg(long)]
        author_id: RecordId,
    },
    /// Replace every field of a book.
    UpdateBook {
        #[arg(long)]
        id: RecordId,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        isbn: String,
        #[arg(long, allow_negative_numbers = true)]
        year: i32,
        #[arg(long)]
        author_id: RecordId,
    },
    /// Delete a book that is not on loan.
    DeleteBook {
        #[arg(long)]
        id: RecordId,
    },
    /// List books.
    ListBooks {
        #[arg(long)]
        json: bool,
    },
    /// Add a student.
    AddStudent {
        #[arg(long)]
        id: RecordId,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        grade: String,
    },
    /// Replace a student's name and grade.
    UpdateStudent {
        #[arg(long)]
        id: RecordId,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        grade: String,
    },
    /// Delete a student without loan history.
    DeleteStudent {
        #[arg(long)]
        id: RecordId,
    },
    /// List students.
    ListStudents {
        #[arg(long)]
        json: bool,
    },
    /// Lend an available book to a student.
    AddLoan {
        #[arg(long)]
        id: RecordId,
        #[arg(long)]
        book_id: RecordId,
        #[arg(long)]
        student_id: RecordId,
        /// Loan date, e.g. 2024-01-31.
        #[arg(long)]
        date: String,
    },
    /// Mark an active loan as returned.
    ReturnLoan {
        #[arg(long)]
        id: RecordId,
        #[arg(long)]
        date: String,
    },
    /// Delete a returned loan.
    DeleteLoan {
        #[arg(long)]
        id: RecordId,
    },
    /// List loans.
    ListLoans {
        #[arg(long)]
        json: bool,
    },
    /// Report whether a book can be lent.
    Available {
        #[arg(long)]
        book_id: RecordId,
    },
    /// List books a student currently holds.
    StudentLoans {
        #[arg(long)]
        student_id: RecordId,
    },
    /// Rank authors by number of books.
    Ranking {
        #[arg(long, default_value_t = DEFAULT_RANKING_TOP_N)]
        top: usize,
    },
    /// Print the core crate version.
    Version,
}

/// Result of one command that did not fail for i/o or encoding reasons.
pub enum Outcome {
    Done,
    Rejected(StoreError),
}

pub fn execute<S: CatalogStorage>(
    service: &mut CatalogService<S>,
    command: Command,
) -> Result<Outcome> {
    let result = match command {
        Command::AddAuthor {
            id,
            name,
            nationality,
        } => service.add_author(Author::new(id, name, nationality)),
        Command::UpdateAuthor {
            id,
            name,
            nationality,
        } => service.update_author(id, name, nationality),
        Command::DeleteAuthor { id } => service.delete_author(id).map(drop),
        Command::ListAuthors { json } => {
            let authors = service.store().authors();
            if json {
                print_json(authors)?;
            } else {
                println!("Authors:");
                for author in authors {
                    println!("[{}] {} ({})", author.id, author.name, author.nationality);
                }
            }
            return Ok(Outcome::Done);
        }
        Command::AddBook {
            id,
            title,
            isbn,
            year,
            author_id,
        } => service.add_book(Book::new(id, title, isbn, year, author_id)),
        Command::UpdateBook {
            id,
            title,
            isbn,
            year,
            author_id,
        } => service.update_book(id, title, isbn, year, author_id),
        Command::DeleteBook { id } => service.delete_book(id).map(drop),
        Command::ListBooks { json } => {
            let books = service.store().books();
            if json {
                print_json(books)?;
            } else {
                println!("Books:");
                for book in books {
                    println!(
                        "[{}] {} | ISBN {} | {} | author {}",
                        book.id, book.title, book.isbn, book.year, book.author_id
                    );
                }
            }
            return Ok(Outcome::Done);
        }
        Command::AddStudent { id, name, grade } => {
            service.add_student(Student::new(id, name, grade))
        }
        Command::UpdateStudent { id, name, grade } => service.update_student(id, name, grade),
        Command::DeleteStudent { id } => service.delete_student(id).map(drop),
        Command::ListStudents { json } => {
            let students = service.store().students();
            if json {
                print_json(students)?;
            } else {
                println!("Students:");
                for student in students {
                    println!("[{}] {} - {}", student.id, student.name, student.grade);
                }
            }
            return Ok(Outcome::Done);
        }
        Command::AddLoan {
            id,
            book_id,
            student_id,
            date,
        } => service.add_loan(Loan::new(id, book_id, student_id, date)),
        Command::ReturnLoan { id, date } => service.return_loan(id, date),
        Command::DeleteLoan { id } => service.delete_loan(id).map(drop),
        Command::ListLoans { json } => {
            let loans = service.store().loans();
            if json {
                print_json(loans)?;
            } else {
                println!("Loans:");
                for loan in loans {
                    let status = if loan.is_active() {
                        "ACTIVE".to_string()
                    } else {
                        format!("returned {}", loan.return_date)
                    };
                    println!(
                        "[{}] book {} to student {} ({} - {})",
                        loan.id, loan.book_id, loan.student_id, loan.loan_date, status
                    );
                }
            }
            return Ok(Outcome::Done);
        }
        Command::Available { book_id } => {
            let available = service.is_book_available(book_id);
            println!("book {book_id} available={available}");
            return Ok(Outcome::Done);
        }
        Command::StudentLoans { student_id } => {
            println!("Active loans for student {student_id}:");
            for loan in service.active_loans_for_student(student_id) {
                println!(
                    " - [{}] {} (ISBN {}) lent on {}",
                    loan.book.id, loan.book.title, loan.book.isbn, loan.loan_date
                );
            }
            return Ok(Outcome::Done);
        }
        Command::Ranking { top } => {
            println!("Authors with most books:");
            for rank in service.author_ranking_by_book_count(top) {
                println!(" - {} : {}", rank.author_name, rank.book_count);
            }
            return Ok(Outcome::Done);
        }
        Command::Version => return Ok(Outcome::Done),
    };

    match result {
        Ok(()) => {
            println!("OK");
            Ok(Outcome::Done)
        }
        Err(ServiceError::Store(err)) => Ok(Outcome::Rejected(err)),
        Err(err) => Err(err.into()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
