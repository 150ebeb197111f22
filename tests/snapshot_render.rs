use hashkit::{AbstractTable, Config, HashType, Snapshot, ARROW};
use test_log::test;

#[test]
fn snapshot_chained_grid() -> hashkit::Result<()> {
    let mut table = Config::new()
        .initial_capacity(3)
        .load_factor(1.0)
        .hash_type(HashType::Division)
        .open_chained::<u32, String>()?;

    table.put(0, "zero".into());
    table.put(3, "three".into());
    table.put(2, "two".into());

    let snapshot = Snapshot::of(&table);

    assert_eq!(
        vec![
            vec!["[ 0 ]".to_owned(), ARROW.into(), "3=three".into(), ARROW.into(), "0=zero".into()],
            vec!["[ 1 ]".to_owned()],
            vec!["[ 2 ]".to_owned(), ARROW.into(), "2=two".into()],
        ],
        snapshot.rows(),
    );

    let text = snapshot.to_string();
    assert_eq!(3, text.lines().count());
    assert!(text.lines().all(|line| line.starts_with(" [ ")));

    Ok(())
}

#[test]
fn snapshot_render_delimiter() -> hashkit::Result<()> {
    let mut table = Config::new().initial_capacity(2).open_addressed::<u32, String>()?;
    table.put(1, "Renault;Laguna;2001".into());

    let text = Snapshot::of(&table).render(";");
    assert!(text.contains("1=Renault"));
    assert!(!text.contains("Laguna"));

    let text = Snapshot::of(&table).render("");
    assert!(text.contains("1=Renault;Laguna;2001"));

    Ok(())
}

#[test]
fn snapshot_empty_table() -> hashkit::Result<()> {
    let table = Config::new().initial_capacity(2).open_chained::<u32, u32>()?;

    let snapshot = Snapshot::of(&table);
    assert_eq!(2, snapshot.rows().len());
    assert_eq!(" [ 0 ] \n [ 1 ] \n", snapshot.render(""));
    assert!(table.stats().to_string().contains("Max chain size: 0"));

    Ok(())
}
