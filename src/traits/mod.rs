/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits

Bit streams implement [`BitRead`] or [`BitWrite`] (and possibly [`BitSeek`]);
they are built on byte streams implementing [`ByteRead`] or [`ByteWrite`]
(and possibly [`ByteSeek`]).

*/

mod bits;
pub use bits::*;

mod byte_stream;
pub use byte_stream::*;
