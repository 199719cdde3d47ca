use bibliodb_core::{Author, Book, CatalogStore, Loan, RecordKind, StoreError, Student};

fn seeded() -> CatalogStore {
    let mut store = CatalogStore::new();
    store
        .add_author(Author::new(1, "Tolkien", "British"))
        .unwrap();
    store
        .add_book(Book::new(1, "The Hobbit", "ISBN1", 1937, 1))
        .unwrap();
    store.add_student(Student::new(1, "Alice", "10th")).unwrap();
    store
}

#[test]
fn add_author_then_lookup_returns_it_unchanged() {
    let mut store = CatalogStore::new();
    let author = Author::new(7, "Le Guin, Ursula", "American \"US\"");
    store.add_author(author.clone()).unwrap();

    assert_eq!(store.author(7), Some(&author));
    assert_eq!(store.authors(), &[author]);
}

#[test]
fn duplicate_author_is_rejected_and_store_unchanged() {
    let mut store = seeded();
    let before = store.clone();

    let err = store
        .add_author(Author::new(1, "Someone", "Else"))
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::DuplicateId {
            kind: RecordKind::Author,
            id: 1
        }
    );
    assert_eq!(store, before);
}

#[test]
fn id_spaces_are_independent() {
    let mut store = seeded();
    // Author, book and student all use id 1 already; a loan may too.
    store.add_loan(Loan::new(1, 1, 1, "2024-01-01")).unwrap();
    assert_eq!(store.loans().len(), 1);
}

#[test]
fn update_author_replaces_fields_and_reports_missing() {
    let mut store = seeded();
    store.update_author(1, "J.R.R. Tolkien", "English").unwrap();

    let author = store.author(1).unwrap();
    assert_eq!(author.name, "J.R.R. Tolkien");
    assert_eq!(author.nationality, "English");

    let err = store.update_author(2, "x", "y").unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound {
            kind: RecordKind::Author,
            id: 2
        }
    ));
}

#[test]
fn delete_author_blocked_while_referenced_by_book() {
    let mut store = seeded();
    assert_eq!(
        store.delete_author(1).unwrap_err(),
        StoreError::ReferencedByBook(1)
    );

    store.delete_book(1).unwrap();
    let removed = store.delete_author(1).unwrap();
    assert_eq!(removed.name, "Tolkien");
    assert!(store.authors().is_empty());
}

#[test]
fn delete_missing_author_is_not_found() {
    let mut store = seeded();
    let err = store.delete_author(42).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 42, .. }));
}

#[test]
fn add_book_fails_iff_author_is_unknown() {
    let mut store = seeded();
    assert_eq!(
        store
            .add_book(Book::new(2, "Silmarillion", "ISBN2", 1977, 9))
            .unwrap_err(),
        StoreError::UnknownAuthor(9)
    );
    store
        .add_book(Book::new(2, "Silmarillion", "ISBN2", 1977, 1))
        .unwrap();
    assert_eq!(store.books().len(), 2);
}

#[test]
fn add_book_reports_duplicate_before_unknown_author() {
    let mut store = seeded();
    let err = store
        .add_book(Book::new(1, "Other", "ISBN", 2000, 9))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::DuplicateId {
            kind: RecordKind::Book,
            id: 1
        }
    ));
}

#[test]
fn update_book_validates_author_and_identity() {
    let mut store = seeded();
    store
        .add_author(Author::new(2, "Lewis", "British"))
        .unwrap();

    assert_eq!(
        store
            .update_book(1, "The Hobbit", "ISBN1", 1937, 5)
            .unwrap_err(),
        StoreError::UnknownAuthor(5)
    );
    assert!(matches!(
        store.update_book(3, "t", "i", 1, 1).unwrap_err(),
        StoreError::NotFound {
            kind: RecordKind::Book,
            id: 3
        }
    ));

    store.update_book(1, "Narnia", "ISBN9", 1950, 2).unwrap();
    assert_eq!(store.book(1), Some(&Book::new(1, "Narnia", "ISBN9", 1950, 2)));
}

#[test]
fn delete_book_fails_iff_book_is_unavailable() {
    let mut store = seeded();
    store.add_loan(Loan::new(1, 1, 1, "2024-01-01")).unwrap();
    assert!(!store.is_book_available(1));
    assert_eq!(store.delete_book(1).unwrap_err(), StoreError::BookOnLoan(1));

    store.return_loan(1, "2024-02-01").unwrap();
    assert!(store.is_book_available(1));
    store.delete_book(1).unwrap();
    assert!(store.book(1).is_none());
}

#[test]
fn delete_unknown_book_is_not_found() {
    let mut store = seeded();
    assert!(store.is_book_available(99));
    assert_eq!(
        store.delete_book(99).unwrap_err(),
        StoreError::NotFound {
            kind: RecordKind::Book,
            id: 99
        }
    );
    assert_eq!(store.books().len(), 1);
}

#[test]
fn delete_unknown_student_is_not_found() {
    let mut store = seeded();
    assert_eq!(
        store.delete_student(99).unwrap_err(),
        StoreError::NotFound {
            kind: RecordKind::Student,
            id: 99
        }
    );
    assert_eq!(store.students().len(), 1);
}

#[test]
fn student_crud_and_delete_blocked_by_any_loan() {
    let mut store = seeded();
    store.update_student(1, "Alice B.", "11th").unwrap();
    assert_eq!(store.student(1).unwrap().grade, "11th");

    store.add_loan(Loan::new(1, 1, 1, "2024-01-01")).unwrap();
    store.return_loan(1, "2024-01-10").unwrap();
    // Returned loans still count as history.
    assert_eq!(store.delete_student(1).unwrap_err(), StoreError::HasLoans(1));

    store.delete_loan(1).unwrap();
    store.delete_student(1).unwrap();
    assert!(store.students().is_empty());
}

#[test]
fn add_loan_rejects_dangling_references() {
    let mut store = seeded();
    assert_eq!(
        store.add_loan(Loan::new(1, 5, 1, "d")).unwrap_err(),
        StoreError::UnknownBook(5)
    );
    assert_eq!(
        store.add_loan(Loan::new(1, 1, 5, "d")).unwrap_err(),
        StoreError::UnknownStudent(5)
    );
    assert!(store.loans().is_empty());
}

#[test]
fn return_loan_is_one_way() {
    let mut store = seeded();
    store.add_loan(Loan::new(1, 1, 1, "2024-01-01")).unwrap();
    store.return_loan(1, "2024-02-01").unwrap();

    assert_eq!(
        store.return_loan(1, "2024-03-01").unwrap_err(),
        StoreError::AlreadyReturned(1)
    );
    assert_eq!(store.loan(1).unwrap().return_date, "2024-02-01");
    assert!(matches!(
        store.return_loan(9, "2024-03-01").unwrap_err(),
        StoreError::NotFound {
            kind: RecordKind::Loan,
            id: 9
        }
    ));
}

#[test]
fn delete_loan_blocked_while_active() {
    let mut store = seeded();
    store.add_loan(Loan::new(1, 1, 1, "2024-01-01")).unwrap();
    assert_eq!(store.delete_loan(1).unwrap_err(), StoreError::LoanActive(1));

    store.return_loan(1, "2024-01-02").unwrap();
    let removed = store.delete_loan(1).unwrap();
    assert_eq!(removed.id, 1);
    assert!(matches!(
        store.delete_loan(1).unwrap_err(),
        StoreError::NotFound { id: 1, .. }
    ));
}

#[test]
fn borrow_return_borrow_scenario() {
    let mut store = seeded();

    store.add_loan(Loan::new(1, 1, 1, "2024-01-01")).unwrap();
    assert_eq!(
        store
            .add_loan(Loan::new(2, 1, 1, "2024-01-02"))
            .unwrap_err(),
        StoreError::BookUnavailable(1)
    );

    store.return_loan(1, "2024-02-01").unwrap();
    store.add_loan(Loan::new(2, 1, 1, "2024-01-02")).unwrap();

    assert!(!store.is_book_available(1));
    let active: Vec<_> = store
        .loans()
        .iter()
        .filter(|loan| loan.is_active())
        .map(|loan| loan.id)
        .collect();
    assert_eq!(active, vec![2]);
}
