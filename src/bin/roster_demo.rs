use flash_roster::{ConsoleFinancialAid, ConsoleNotifier, Grade, Grades, Roster, RosterReport};

fn grades(pairs: &[(&str, u32)]) -> Grades {
    pairs
        .iter()
        .map(|&(course, score)| (course.to_string(), Grade::from(score)))
        .collect()
}

fn print_details(roster: &Roster<u64>, id: u64) {
    match roster.search(&id) {
        Some(student) => println!("\n{}", student),
        None => println!("Student with ID {} not found!", id),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut roster: Roster<u64> = Roster::new();

    roster.add(1001, "John Doe", Some(grades(&[("Math", 85), ("Physics", 90)])))?;
    roster.add(1002, "Jane Smith", Some(grades(&[("Math", 95), ("Physics", 88)])))?;
    roster.add(1003, "Bob Johnson", Some(grades(&[("Math", 78), ("Physics", 85)])))?;

    println!("\nInitial Student List:");
    print!("{}", RosterReport(&roster));

    println!("\nSearching for student 1002:");
    print_details(&roster, 1002);
    println!("GPA: {:.2}", roster.calculate_gpa(&1002));

    if let Err(err) = roster.add(1002, "Jane Again", None) {
        println!("{}", err);
    }

    roster.update_grade(&1001, "Math", 88u32)?;
    println!("\nAfter updating John's Math grade:");
    print_details(&roster, 1001);

    roster.delete(&1002)?;
    println!("\nAfter deleting Jane Smith:");
    print!("{}", RosterReport(&roster));

    println!("\nTrying to find deleted student (1002):");
    print_details(&roster, 1002);

    roster.enroll(&1003, "Math")?;
    roster.enroll(&1003, "Physics")?;
    println!("\nWithdrawing Bob Johnson:");
    roster.process_withdrawal(&1003, &mut ConsoleNotifier, &mut ConsoleFinancialAid)?;
    print!("{}", RosterReport(&roster));

    roster.check_consistency()?;

    Ok(())
}
