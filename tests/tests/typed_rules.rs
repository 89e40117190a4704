use assembler::{
    assembler_of, err, mapper, Blocking, Concurrent, Mapper, MapperError, MapperResult,
};
use pretty_assertions::assert_eq;
use tests::*;

#[test]
fn single_mapper() {
    init_tracing();

    let assembled = assembler_of::<(String, Option<String>)>()
        .with_id_extractor(|customer: &Customer| customer.customer_id)
        .with_assembler_rules(
            (billing_info_mapper(),),
            |customer: Customer, billing_info: Option<BillingInfo>| {
                (customer.name, billing_info.map(|b| b.credit_card))
            },
        )
        .using(Blocking)
        .assemble(customers())
        .unwrap();

    assert_eq!(
        assembled,
        [
            ("Clair Gabriel".to_string(), Some("4540977822220971".to_string())),
            ("Erick Daria".to_string(), None),
            ("Brenden Jacob".to_string(), Some("4530987722349872".to_string())),
        ]
    );
}

#[tokio::test]
async fn constructor_as_builder() {
    let assembler = assembler_of::<Transaction>()
        .with_id_extractor(|customer: &Customer| customer.customer_id)
        .with_assembler_rules(
            (billing_info_mapper(), order_items_mapper()),
            Transaction::new,
        )
        .using(Concurrent);

    assert_eq!(assembler.num_mappers(), 2);
    assert_eq!(
        assembler.assemble(customers()).await.unwrap(),
        expected_transactions()
    );
}

#[derive(Debug, PartialEq)]
struct Summary {
    name: String,
    has_card: bool,
    items: usize,
    loyalty_points: u32,
}

#[tokio::test]
async fn mixed_value_types() {
    let loyalty_points = mapper::from_fn(|ids: &[u64]| {
        Ok::<_, MapperError>(
            ids.iter()
                .filter(|id| **id != 2)
                .map(|id| (*id, *id as u32 * 100))
                .collect::<MapperResult<_, _>>(),
        )
    });

    let assembled = assembler_of::<Summary>()
        .with_id_extractor(|customer: &Customer| customer.customer_id)
        .with_assembler_rules(
            (
                billing_info_mapper(),
                order_items_mapper(),
                loyalty_points,
            ),
            |customer: Customer,
             billing_info: Option<BillingInfo>,
             items: Option<Vec<OrderItem>>,
             points: Option<u32>| Summary {
                name: customer.name,
                has_card: billing_info.is_some(),
                items: items.map_or(0, |items| items.len()),
                loyalty_points: points.unwrap_or_default(),
            },
        )
        .using(Concurrent)
        .assemble(customers())
        .await
        .unwrap();

    assert_eq!(
        assembled,
        [
            Summary {
                name: "Clair Gabriel".to_string(),
                has_card: true,
                items: 2,
                loyalty_points: 100,
            },
            Summary {
                name: "Erick Daria".to_string(),
                has_card: false,
                items: 1,
                loyalty_points: 0,
            },
            Summary {
                name: "Brenden Jacob".to_string(),
                has_card: true,
                items: 0,
                loyalty_points: 300,
            },
        ]
    );
}

#[tokio::test]
async fn one_to_many_gives_empty_vec_not_none() {
    let assembled = assembler_of::<Option<usize>>()
        .with_id_extractor(|customer: &Customer| customer.customer_id)
        .with_assembler_rules(
            (order_items_mapper(),),
            |_: Customer, items: Option<Vec<OrderItem>>| items.map(|items| items.len()),
        )
        .using(Concurrent)
        .assemble(customers())
        .await
        .unwrap();

    assert_eq!(assembled, [Some(2), Some(1), Some(0)]);
}

#[tokio::test]
async fn typed_rules_with_error_converter() {
    let failing = mapper::from_async_fn(|_ids: Vec<u64>| async {
        Err::<MapperResult<u64, u32>, _>(std::io::Error::other("points ledger offline"))
    });

    let err = assembler_of::<Transaction>()
        .with_id_extractor(|customer: &Customer| customer.customer_id)
        .with_assembler_rules(
            (billing_info_mapper(), failing),
            |customer: Customer, billing_info: Option<BillingInfo>, _: Option<u32>| {
                Transaction::new(customer, billing_info, None)
            },
        )
        .with_error_converter(|cause| err!("could not assemble transactions: {cause}"))
        .using(Concurrent)
        .assemble(customers())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "could not assemble transactions: points ledger offline"
    );
}

fn constant<V>(value: V) -> impl Mapper<u64, Value = V>
where
    V: Clone + Send + Sync + 'static,
{
    mapper::from_fn(move |ids: &[u64]| {
        Ok::<_, MapperError>(
            ids.iter()
                .map(|id| (*id, value.clone()))
                .collect::<MapperResult<_, _>>(),
        )
    })
}

#[test]
fn eleven_mappers() {
    let assembled = assembler_of::<(u64, i64, Option<bool>, Option<char>, bool)>()
        .with_id_extractor(|customer: &Customer| customer.customer_id)
        .with_assembler_rules(
            (
                constant(1u8),
                constant(2u16),
                constant(3u32),
                constant(4u64),
                constant(5i8),
                constant(6i16),
                constant(7i32),
                constant(8i64),
                constant(true),
                constant('x'),
                billing_info_mapper(),
            ),
            |customer: Customer,
             a: Option<u8>,
             b: Option<u16>,
             c: Option<u32>,
             d: Option<u64>,
             e: Option<i8>,
             f: Option<i16>,
             g: Option<i32>,
             h: Option<i64>,
             flag: Option<bool>,
             letter: Option<char>,
             billing_info: Option<BillingInfo>| {
                let total = [
                    a.map(i64::from),
                    b.map(i64::from),
                    c.map(i64::from),
                    d.map(|d| d as i64),
                    e.map(i64::from),
                    f.map(i64::from),
                    g.map(i64::from),
                    h,
                ]
                .into_iter()
                .flatten()
                .sum::<i64>();

                (
                    customer.customer_id,
                    total,
                    flag,
                    letter,
                    billing_info.is_some(),
                )
            },
        )
        .using(Blocking)
        .assemble(customers())
        .unwrap();

    assert_eq!(
        assembled,
        [
            (1, 36, Some(true), Some('x'), true),
            (2, 36, Some(true), Some('x'), false),
            (3, 36, Some(true), Some('x'), true),
        ]
    );
}
