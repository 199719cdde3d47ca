use bibliodb_core::{Author, Book, Loan, RecordKind, Student};

#[test]
fn loan_serialization_uses_expected_wire_fields() {
    let loan = Loan::new(3, 1, 2, "2024-01-01");

    let json = serde_json::to_value(&loan).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["book_id"], 1);
    assert_eq!(json["student_id"], 2);
    assert_eq!(json["loan_date"], "2024-01-01");
    assert_eq!(json["return_date"], "");

    let decoded: Loan = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, loan);
}

#[test]
fn book_and_author_serialize_flat() {
    let book = Book::new(1, "The Hobbit", "ISBN1", 1937, 4);
    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["year"], 1937);
    assert_eq!(json["author_id"], 4);

    let author = Author::new(4, "Tolkien", "British");
    assert_eq!(
        serde_json::to_string(&author).unwrap(),
        r#"{"id":4,"name":"Tolkien","nationality":"British"}"#
    );
}

#[test]
fn student_constructor_keeps_fields() {
    let student = Student::new(9, "Alice", "10th");
    assert_eq!(student.id, 9);
    assert_eq!(student.name, "Alice");
    assert_eq!(student.grade, "10th");
}

#[test]
fn record_kind_names_are_lowercase() {
    assert_eq!(RecordKind::Student.to_string(), "student");
    assert_eq!(
        serde_json::to_value(RecordKind::Loan).unwrap(),
        serde_json::json!("loan")
    );
}
