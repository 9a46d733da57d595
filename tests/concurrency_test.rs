//! Concurrent submissions through a shared controller

use noop_graph::{
    Clazz, Controller, EdgeType, ElementId, Library, Method, NewEdgeOperation,
    NewElementOperation, Project, RootOperation, SharedController,
};

async fn seeded() -> (SharedController, ElementId) {
    let shared = SharedController::new(Controller::new());
    let project = Project::new("Noop", "com.google.noop", "Apache 2");
    let lang = Library::new("lang");
    let (p, l) = (project.id, lang.id);
    shared.apply(RootOperation::new(project)).await.unwrap();
    shared.apply(NewElementOperation::new(lang, p)).await.unwrap();
    (shared, l)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submissions_are_serialized() {
    let (shared, lang) = seeded().await;

    let mut handles = Vec::new();
    for i in 0..32 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            shared
                .submit(
                    NewElementOperation::new(Clazz::new(format!("C{}", i)), lang),
                    format!("worker-{}", i),
                )
                .await
                .unwrap()
                .sequence
        }));
    }

    let mut sequences = Vec::new();
    for handle in handles {
        sequences.push(handle.await.unwrap());
    }
    sequences.sort_unstable();
    assert_eq!(sequences, (3..=34).collect::<Vec<u64>>());

    let history = shared.get_history().await;
    assert_eq!(history.len(), 34);
    assert!(history
        .iter()
        .enumerate()
        .all(|(idx, entry)| entry.sequence == idx as u64 + 1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_see_whole_operations() {
    let (shared, lang) = seeded().await;
    let int = Clazz::new("Integer");
    let i = int.id;
    shared.apply(NewElementOperation::new(int, lang)).await.unwrap();

    let writer = {
        let shared = shared.clone();
        tokio::spawn(async move {
            for n in 0..50 {
                let method = Method::new(format!("m{}", n));
                shared
                    .apply(
                        NewElementOperation::new(method, i)
                            .with_edge(EdgeType::TypeOf, i)
                            .with_edge(EdgeType::TypeOf, i),
                    )
                    .await
                    .unwrap();
            }
        })
    };

    // every method is always observed with both of its edges
    for _ in 0..50 {
        let snapshot = shared.snapshot().await;
        for method in snapshot.children_of(i) {
            assert_eq!(snapshot.edges(*method, EdgeType::TypeOf).len(), 2);
        }
        tokio::task::yield_now().await;
    }
    writer.await.unwrap();

    assert_eq!(shared.snapshot().await.children_of(i).len(), 50);
}

#[tokio::test]
async fn test_duplicate_edges_through_shared_handle() {
    let (shared, lang) = seeded().await;
    let class_b = Clazz::new("B");
    let b = class_b.id;
    shared.apply(NewElementOperation::new(class_b, lang)).await.unwrap();
    let method = Method::new("a");
    let m = method.id;
    shared.apply(NewElementOperation::new(method, b)).await.unwrap();

    shared.apply(NewEdgeOperation::new(m, EdgeType::TypeOf, b)).await.unwrap();
    shared.apply(NewEdgeOperation::new(m, EdgeType::TypeOf, b)).await.unwrap();

    assert_eq!(shared.get_edges(m, EdgeType::TypeOf).await, vec![b, b]);
    assert!(shared.get_element(m).await.is_some());
}
