use assembler::{assembler_of, Blocking, Concurrent, DynMapper};
use pretty_assertions::assert_eq;
use std::{sync::Arc, thread};
use tests::*;

#[test]
fn shared_between_threads() {
    init_tracing();

    let orders = RecordingMapper::<u64, String>::new(
        order_items()
            .into_iter()
            .map(|i| (i.customer_id, i.item)),
    );
    let calls = orders.calls();

    let assembler = assembler_of::<Option<String>>()
        .with_id_extractor(|customer: &Customer| customer.customer_id)
        .with_rules([Arc::new(orders) as DynMapper<u64, String>], |_, mut values| {
            values.remove(0)
        })
        .using(Blocking);

    thread::scope(|scope| {
        for id in 1..=4 {
            let assembler = &assembler;
            scope.spawn(move || {
                let assembled = assembler.assemble(vec![customer(id, "any")]).unwrap();
                assert_eq!(assembled.len(), 1);
            });
        }
    });

    let mut seen = calls.all();
    seen.sort();
    assert_eq!(seen, [vec![1], vec![2], vec![3], vec![4]]);
}

#[tokio::test]
async fn clones_share_mappers() {
    let cards = RecordingMapper::<u64, String>::new(
        billing_infos()
            .into_iter()
            .map(|b| (b.customer_id, b.credit_card)),
    );
    let calls = cards.calls();

    let assembler = assembler_of::<bool>()
        .with_id_extractor(|customer: &Customer| customer.customer_id)
        .with_rules([Arc::new(cards) as DynMapper<u64, String>], |_, values| {
            values[0].is_some()
        })
        .using(Concurrent);

    let clone = assembler.clone();

    let (first, second) = tokio::join!(
        assembler.assemble(customers()),
        clone.assemble(vec![customer(2, "b")]),
    );

    assert_eq!(first.unwrap(), [true, false, true]);
    assert_eq!(second.unwrap(), [false]);
    assert_eq!(calls.count(), 2);
    assert_eq!(format!("{clone:?}"), "Assembler { mappers: 1, adapter: Concurrent }");
}
