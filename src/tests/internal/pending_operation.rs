//! 挂起点测试：恰好一次交付、取消传播、状态流转、违约操作源。
//!
//! 操作源均为测试内的手动实现，由控制器决定何时触发哪个回调。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::call::{CallError, CallErrorKind, CallState, PendingOperation, await_callback, await_source};
use crate::parser::{FnParser, Parser};
use crate::source::{Disposable, FutureSource, OperationSource, Reactions, ReactiveSource};
use crate::tests::{ImmediateCall, init_tracing, manual_call, manual_reactive};

#[tokio::test]
async fn immediate_failure_is_delivered_as_is() {
    init_tracing();
    let source = ImmediateCall(|reactions: Reactions<i32>| {
        reactions.on_error(CallError::HttpStatus {
            status: 503,
            body: "维护中".into(),
        });
    });
    let op = PendingOperation::<i32>::new(OperationSource::callback(source));
    let state = op.state();

    let result = op.await_value().await;

    match result {
        Err(CallError::HttpStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "维护中");
        }
        other => panic!("期望 HttpStatus 错误，实际: {other:?}"),
    }
    assert_eq!(state.get_current(), CallState::Failed);
}

#[tokio::test]
async fn immediate_success_runs_parser() {
    let source = ImmediateCall(|reactions: Reactions<i32>| {
        reactions.on_success(21);
    });
    let doubled = await_callback(
        source,
        FnParser(|raw: i32| -> Result<i32, CallError> { Ok(raw * 2) }),
    )
    .await
    .unwrap();
    assert_eq!(doubled, 42);
}

#[tokio::test]
async fn reactive_success_resumes_waiter() {
    let (source, controller) = manual_reactive::<String>();
    let op = PendingOperation::new(OperationSource::reactive(source));
    let state = op.state();
    let waiter = tokio::spawn(op.await_value());

    controller.wait_registered().await;
    assert_eq!(state.get_current(), CallState::Pending);
    assert!(controller.succeed("done".to_string()));

    assert_eq!(waiter.await.unwrap().unwrap(), "done");
    assert_eq!(state.get_current(), CallState::Fulfilled);
    assert_eq!(controller.cancel_count(), 0);
}

#[tokio::test]
async fn transform_failure_is_not_a_cancellation() {
    let (source, controller) = manual_call::<i32>();
    let op = PendingOperation::new(OperationSource::callback(source));
    let state = op.state();
    let waiter = tokio::spawn(op.await_with(FnParser(
        |raw: i32| -> Result<u32, CallError> {
            u32::try_from(raw).map_err(|e| CallError::Transform(e.to_string()))
        },
    )));

    controller.wait_registered().await;
    controller.succeed(-1);

    let err = waiter.await.unwrap().unwrap_err();
    assert_eq!(err.kind(), CallErrorKind::Transform);
    assert_eq!(state.get_current(), CallState::Failed);
    assert_eq!(controller.cancel_count(), 0);
}

#[tokio::test]
async fn token_cancel_before_reaction_cancels_source_once() {
    init_tracing();
    let (source, controller) = manual_call::<i32>();
    let token = CancellationToken::new();
    let op = PendingOperation::new(OperationSource::callback(source)).with_cancellation(token.clone());
    let state = op.state();
    let waiter = tokio::spawn(op.await_value());

    controller.wait_registered().await;
    token.cancel();

    let err = waiter.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(err.kind(), CallErrorKind::Cancellation);
    assert_eq!(controller.cancel_count(), 1);
    assert_eq!(state.get_current(), CallState::Cancelled);

    // 取消之后迟到的回调不会改变任何东西
    controller.succeed(7);
    token.cancel();
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(controller.cancel_count(), 1);
    assert_eq!(state.get_current(), CallState::Cancelled);
}

#[tokio::test]
async fn cancel_after_result_is_noop() {
    let (source, controller) = manual_reactive::<i32>();
    let token = CancellationToken::new();
    let op = PendingOperation::new(OperationSource::reactive(source)).with_cancellation(token.clone());
    let state = op.state();
    let waiter = tokio::spawn(op.await_value());

    controller.wait_registered().await;
    controller.succeed(3);
    assert_eq!(waiter.await.unwrap().unwrap(), 3);

    token.cancel();
    assert_eq!(controller.cancel_count(), 0);
    assert_eq!(state.get_current(), CallState::Fulfilled);
}

/// 开始解析时发出通知，然后等待放行才返回原值的解析器
struct GatedParser {
    entered: Mutex<Option<oneshot::Sender<()>>>,
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

impl GatedParser {
    fn new() -> (Self, oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let parser = Self {
            entered: Mutex::new(Some(entered_tx)),
            release: Mutex::new(Some(release_rx)),
        };
        (parser, entered_rx, release_tx)
    }
}

#[async_trait]
impl Parser<i32, i32> for GatedParser {
    async fn on_parse(&self, raw: i32) -> Result<i32, CallError> {
        if let Some(entered) = self.entered.lock().unwrap().take() {
            let _ = entered.send(());
        }
        let release = self.release.lock().unwrap().take();
        if let Some(release) = release {
            let _ = release.await;
        }
        Ok(raw)
    }
}

#[tokio::test]
async fn cancel_during_parse_cancels_source() {
    let (source, controller) = manual_call::<i32>();
    let (parser, entered, _release) = GatedParser::new();
    let token = CancellationToken::new();
    let op = PendingOperation::new(OperationSource::callback(source)).with_cancellation(token.clone());
    let state = op.state();
    let waiter = tokio::spawn(op.await_with(parser));

    controller.wait_registered().await;
    assert!(controller.succeed(5));
    // 原始结果已送达，解析尚未结束，结果还没有提交
    entered.await.unwrap();
    token.cancel();

    let err = waiter.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(controller.cancel_count(), 1);
    assert_eq!(state.get_current(), CallState::Cancelled);
}

#[tokio::test]
async fn cancel_after_parse_is_noop() {
    let (source, controller) = manual_call::<i32>();
    let (parser, entered, release) = GatedParser::new();
    let token = CancellationToken::new();
    let op = PendingOperation::new(OperationSource::callback(source)).with_cancellation(token.clone());
    let state = op.state();
    let waiter = tokio::spawn(op.await_with(parser));

    controller.wait_registered().await;
    controller.succeed(5);
    entered.await.unwrap();
    release.send(()).unwrap();

    assert_eq!(waiter.await.unwrap().unwrap(), 5);
    token.cancel();
    assert_eq!(controller.cancel_count(), 0);
    assert_eq!(state.get_current(), CallState::Fulfilled);
}

#[tokio::test]
async fn dropping_the_waiter_cancels_source() {
    let (source, controller) = manual_call::<i32>();
    let op = PendingOperation::new(OperationSource::callback(source));
    let state = op.state();
    let waiter = tokio::spawn(op.await_value());

    controller.wait_registered().await;
    waiter.abort();
    assert!(waiter.await.unwrap_err().is_cancelled());

    assert_eq!(controller.cancel_count(), 1);
    assert_eq!(state.get_current(), CallState::Cancelled);
}

#[tokio::test]
async fn never_polled_waiter_does_not_start_source() {
    let (source, controller) = manual_call::<i32>();
    let op = PendingOperation::new(OperationSource::callback(source));
    let state = op.state();

    drop(op.await_value());

    assert_eq!(controller.cancel_count(), 0);
    assert_eq!(state.get_current(), CallState::Idle);
}

#[tokio::test]
async fn duplicate_reaction_is_ignored() {
    init_tracing();
    let (source, controller) = manual_call::<i32>();
    let waiter = tokio::spawn(PendingOperation::new(OperationSource::callback(source)).await_value());

    controller.wait_registered().await;
    assert!(controller.succeed(1));
    assert!(!controller.succeed(2));
    assert!(!controller.fail(CallError::Transform("迟到".into())));

    assert_eq!(waiter.await.unwrap().unwrap(), 1);
}

#[tokio::test]
async fn abandoned_source_fails_instead_of_hanging() {
    let (source, controller) = manual_reactive::<i32>();
    let op = PendingOperation::new(OperationSource::reactive(source));
    let state = op.state();
    let waiter = tokio::spawn(op.await_value());

    controller.wait_registered().await;
    controller.abandon();

    let result = tokio::time::timeout(Duration::from_secs(1), waiter)
        .await
        .expect("等待方不应挂起")
        .unwrap();
    assert!(matches!(result, Err(CallError::Abandoned)));
    assert_eq!(state.get_current(), CallState::Failed);
    assert_eq!(controller.cancel_count(), 0);
}

/// 结果与取消同时到达：要么拿到值且从未取消，要么取消恰好一次。
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn result_and_cancel_race_settles_exactly_once() {
    let fulfilled = Arc::new(AtomicUsize::new(0));
    let cancelled = Arc::new(AtomicUsize::new(0));

    for round in 0..200 {
        let (source, controller) = manual_call::<usize>();
        let token = CancellationToken::new();
        let op = PendingOperation::new(OperationSource::callback(source)).with_cancellation(token.clone());
        let state = op.state();
        let waiter = tokio::spawn(op.await_value());

        controller.wait_registered().await;
        let resolver = {
            let controller = controller.clone();
            tokio::spawn(async move {
                controller.succeed(round);
            })
        };
        let canceller = tokio::spawn(async move { token.cancel() });

        let outcome = waiter.await.unwrap();
        resolver.await.unwrap();
        canceller.await.unwrap();

        match outcome {
            Ok(value) => {
                assert_eq!(value, round);
                assert_eq!(controller.cancel_count(), 0);
                assert_eq!(state.get_current(), CallState::Fulfilled);
                fulfilled.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                assert!(err.is_cancelled(), "意外的错误: {err:?}");
                assert_eq!(controller.cancel_count(), 1);
                assert_eq!(state.get_current(), CallState::Cancelled);
                cancelled.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    assert_eq!(
        fulfilled.load(Ordering::Relaxed) + cancelled.load(Ordering::Relaxed),
        200
    );
}

#[tokio::test]
async fn state_watcher_sees_pending_then_terminal() {
    let (source, controller) = manual_call::<i32>();
    let op = PendingOperation::new(OperationSource::callback(source));
    let mut watcher = op.state().watch();
    assert_eq!(watcher.borrow(), CallState::Idle);

    let waiter = tokio::spawn(op.await_value());
    let pending = watcher
        .wait_for(|state| *state != CallState::Idle)
        .await
        .unwrap();
    assert_eq!(pending, CallState::Pending);

    controller.succeed(9);
    let terminal = watcher.wait_for(CallState::is_terminal).await.unwrap();
    assert_eq!(terminal, CallState::Fulfilled);
    assert_eq!(waiter.await.unwrap().unwrap(), 9);
}

#[tokio::test]
async fn future_source_delivers_value() {
    let value = await_source(FutureSource::new(async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Ok::<_, CallError>(vec![1, 2, 3])
    }))
    .await
    .unwrap();
    assert_eq!(value, vec![1, 2, 3]);
}

#[tokio::test]
async fn future_source_error_is_delivered() {
    let err = await_source(FutureSource::new(async {
        Err::<i32, _>(CallError::Transform("坏数据".into()))
    }))
    .await
    .unwrap_err();
    assert!(matches!(err, CallError::Transform(msg) if msg == "坏数据"));
}

#[tokio::test]
async fn cancelled_future_source_aborts_its_task() {
    let (alive_tx, alive_rx) = oneshot::channel::<()>();
    let token = CancellationToken::new();
    let source = FutureSource::new(async move {
        let _alive = alive_tx;
        std::future::pending::<()>().await;
        Ok::<_, CallError>(0)
    });
    let op = PendingOperation::new(OperationSource::reactive(source)).with_cancellation(token.clone());
    let waiter = tokio::spawn(op.await_value());

    tokio::time::sleep(Duration::from_millis(10)).await;
    token.cancel();
    assert!(waiter.await.unwrap().unwrap_err().is_cancelled());

    // 任务被中止后持有的发送端随之销毁
    let closed = tokio::time::timeout(Duration::from_secs(1), alive_rx).await;
    assert!(matches!(closed, Ok(Err(_))));
}

#[test]
fn future_source_without_runtime_reports_error() {
    let (reactions, mut receiver) = Reactions::<i32>::new();
    let source = Box::new(FutureSource::new(async { Ok::<_, CallError>(1) }));
    let disposable = source.subscribe(reactions);
    disposable.dispose();

    assert!(matches!(receiver.try_recv(), Ok(Err(CallError::NoRuntime))));
}

#[test]
fn error_kinds() {
    assert_eq!(CallError::Cancelled.kind(), CallErrorKind::Cancellation);
    assert_eq!(
        CallError::Transform("x".into()).kind(),
        CallErrorKind::Transform
    );
    assert_eq!(CallError::Abandoned.kind(), CallErrorKind::Transport);
    assert_eq!(
        CallError::HttpStatus {
            status: 500,
            body: String::new()
        }
        .kind(),
        CallErrorKind::Transport
    );
    assert!(!CallError::AlreadyExecuted.is_cancelled());
}
